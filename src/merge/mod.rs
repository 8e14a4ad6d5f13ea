//! Merge engine for declarative git merges
//!
//! Pipeline matching the data flow of a single merge:
//! 1. Intent - accumulate options (`MergeIntent`, no checks)
//! 2. Validate - freeze into a `MergeSnapshot` (pure, testable)
//! 3. Translate - render git arguments (pure, testable)
//! 4. Execute - run the tool (effectful)
//! 5. Classify - map raw output to `MergeOutcome` (pure, testable)

mod classify;
mod execute;
mod intent;
mod translate;
mod validate;

pub use classify::{MergeOutcome, classify_outcome, conflicted_paths};
pub use execute::execute_merge;
pub use intent::MergeIntent;
pub use translate::{render_args, render_squash_commit_args};
pub use validate::{MergeLint, MergeSnapshot, lint_intent, validate_intent};
