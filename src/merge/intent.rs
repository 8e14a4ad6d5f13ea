//! Merge intent - the accumulating description of one merge
//!
//! Nothing here validates. Callers may set fields in any order; the intent
//! is checked once, when it is finalized or executed.

use crate::error::{ConfigurationError, Result};
use crate::exec::{GitRunner, ToolRunner, WorkingContext};
use crate::merge::classify::MergeOutcome;
use crate::merge::execute::execute_merge;
use crate::merge::validate::{MergeSnapshot, validate_intent};
use crate::types::{FastForwardMode, Revision, Strategy};

/// Description of a merge, built up with chained setters
///
/// ```
/// use git_merge_intent::merge::MergeIntent;
/// use git_merge_intent::types::{Revision, Strategy};
///
/// let snapshot = MergeIntent::new()
///     .set_revision_to_merge(Revision::parse("feature-a").unwrap())
///     .add_revision_to_merge(Revision::parse("feature-b").unwrap())
///     .set_strategy(Strategy::Octopus)
///     .finalize()
///     .unwrap();
/// assert_eq!(snapshot.revisions().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct MergeIntent {
    revisions: Vec<Revision>,
    message: Option<String>,
    strategy: Strategy,
    fast_forward_mode: FastForwardMode,
    squash: bool,
    commit: bool,
}

impl Default for MergeIntent {
    fn default() -> Self {
        Self {
            revisions: Vec::new(),
            message: None,
            strategy: Strategy::Default,
            fast_forward_mode: FastForwardMode::Ff,
            squash: false,
            commit: true,
        }
    }
}

impl MergeIntent {
    /// Create an empty intent with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary revision, replacing any previous primary
    ///
    /// Revisions added with [`add_revision_to_merge`](Self::add_revision_to_merge)
    /// after the primary are kept.
    pub fn set_revision_to_merge(mut self, rev: Revision) -> Self {
        if let Some(primary) = self.revisions.first_mut() {
            *primary = rev;
        } else {
            self.revisions.push(rev);
        }
        self
    }

    /// Append a revision (octopus merge). The first one added is primary.
    pub fn add_revision_to_merge(mut self, rev: Revision) -> Self {
        self.revisions.push(rev);
        self
    }

    /// Set the merge commit message
    pub fn set_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the merge strategy
    pub fn set_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the fast-forward mode
    pub fn set_fast_forward_mode(mut self, mode: FastForwardMode) -> Self {
        self.fast_forward_mode = mode;
        self
    }

    /// Squash the merged changes into a single change set
    pub fn set_squash(mut self, squash: bool) -> Self {
        self.squash = squash;
        self
    }

    /// Whether to commit the result after a successful merge
    pub fn set_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    /// Revisions in accumulation order, primary first
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Merge message, if one was set
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Merge strategy
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Fast-forward mode
    pub const fn fast_forward_mode(&self) -> FastForwardMode {
        self.fast_forward_mode
    }

    /// Whether to squash
    pub const fn squash(&self) -> bool {
        self.squash
    }

    /// Whether to commit
    pub const fn commit(&self) -> bool {
        self.commit
    }

    /// Validate and freeze the intent
    pub fn finalize(self) -> std::result::Result<MergeSnapshot, ConfigurationError> {
        validate_intent(&self)
    }

    /// Validate and run the merge with `git` from `PATH`
    pub fn execute(self, context: &WorkingContext) -> Result<MergeOutcome> {
        self.execute_with(context, &GitRunner::new())
    }

    /// Validate and run the merge with a specific runner
    ///
    /// Configuration errors are returned before the runner is touched.
    pub fn execute_with(
        self,
        context: &WorkingContext,
        runner: &dyn ToolRunner,
    ) -> Result<MergeOutcome> {
        let snapshot = self.finalize()?;
        execute_merge(&snapshot, context, runner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rev(name: &str) -> Revision {
        Revision::parse(name).unwrap()
    }

    #[test]
    fn test_defaults() {
        let intent = MergeIntent::new();
        assert!(intent.revisions().is_empty());
        assert_eq!(intent.message(), None);
        assert_eq!(intent.strategy(), Strategy::Default);
        assert_eq!(intent.fast_forward_mode(), FastForwardMode::Ff);
        assert!(!intent.squash());
        assert!(intent.commit());
    }

    #[test]
    fn test_set_replaces_primary_only() {
        let intent = MergeIntent::new()
            .set_revision_to_merge(rev("a"))
            .add_revision_to_merge(rev("b"))
            .set_revision_to_merge(rev("c"));

        assert_eq!(intent.revisions(), &[rev("c"), rev("b")]);
    }

    #[test]
    fn test_add_before_set_becomes_primary() {
        let intent = MergeIntent::new()
            .add_revision_to_merge(rev("a"))
            .add_revision_to_merge(rev("b"));

        assert_eq!(intent.revisions()[0], rev("a"));
        assert_eq!(intent.revisions().len(), 2);
    }

    #[test]
    fn test_setters_accept_any_order() {
        // Contradictory while being built is fine; only finalize checks
        let intent = MergeIntent::new()
            .set_fast_forward_mode(FastForwardMode::FfOnly)
            .set_squash(true)
            .set_squash(false)
            .set_message("first")
            .set_message("second")
            .set_revision_to_merge(rev("main"));

        assert_eq!(intent.message(), Some("second"));
        assert!(intent.finalize().is_ok());
    }
}
