//! git-merge-intent: declarative, validated git merges
//!
//! Describe a merge with [`merge::MergeIntent`], execute it in a
//! [`exec::WorkingContext`], and branch on the typed
//! [`merge::MergeOutcome`]. Conflicts are outcomes, not errors.
//!
//! ```no_run
//! use git_merge_intent::exec::WorkingContext;
//! use git_merge_intent::merge::MergeIntent;
//! use git_merge_intent::types::{FastForwardMode, OutcomeKind, Revision};
//!
//! # fn main() -> git_merge_intent::error::Result<()> {
//! let outcome = MergeIntent::new()
//!     .set_revision_to_merge(Revision::parse("feature")?)
//!     .set_fast_forward_mode(FastForwardMode::FfOnly)
//!     .execute(&WorkingContext::new("/path/to/repo"))?;
//!
//! if outcome.kind == OutcomeKind::AbortedFastForwardOnly {
//!     eprintln!("branches diverged");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod merge;
pub mod types;
