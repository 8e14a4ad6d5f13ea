//! Shared test fixtures

// Each test crate uses a different subset
#![allow(dead_code)]

mod git_repo;
mod mock_runner;

pub use git_repo::{TempGitRepo, git_available};
pub use mock_runner::{MockRunner, RunCall};

use git_merge_intent::merge::MergeIntent;
use git_merge_intent::types::Revision;

/// Parse a revision, panicking on invalid test input
pub fn rev(name: &str) -> Revision {
    Revision::parse(name).unwrap()
}

/// Intent with one revision and default options
pub fn single(name: &str) -> MergeIntent {
    MergeIntent::new().set_revision_to_merge(rev(name))
}
