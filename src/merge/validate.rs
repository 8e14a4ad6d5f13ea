//! Intent validation - pure checks on option combinations
//!
//! No I/O happens here. A passing intent is frozen into a [`MergeSnapshot`]
//! that the translator and executor read from.

use crate::error::ConfigurationError;
use crate::merge::intent::MergeIntent;
use crate::types::{FastForwardMode, Revision, Strategy};

/// Immutable, validated view of a [`MergeIntent`]
///
/// Only [`validate_intent`] can construct one, so every snapshot satisfies
/// the validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSnapshot {
    revisions: Vec<Revision>,
    message: Option<String>,
    strategy: Strategy,
    fast_forward_mode: FastForwardMode,
    squash: bool,
    commit: bool,
}

impl MergeSnapshot {
    /// Revisions in accumulation order, primary first (never empty)
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Primary revision
    pub fn primary(&self) -> &Revision {
        &self.revisions[0]
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

    /// Squash whose staged result gets committed by a follow-up step
    pub const fn commits_squash(&self) -> bool {
        self.squash && self.commit
    }
}

/// Validate an intent (PURE - no I/O)
///
/// Rules are checked in order and the first failure wins:
/// 1. at least one revision
/// 2. several revisions only with the octopus strategy
/// 3. no squash with fast-forward only
pub fn validate_intent(intent: &MergeIntent) -> Result<MergeSnapshot, ConfigurationError> {
    let revisions = intent.revisions();

    if revisions.is_empty() {
        return Err(ConfigurationError::NoRevisionSpecified);
    }

    if revisions.len() > 1 && intent.strategy() != Strategy::Octopus {
        return Err(ConfigurationError::MultiRevisionRequiresOctopus {
            count: revisions.len(),
        });
    }

    if intent.fast_forward_mode() == FastForwardMode::FfOnly && intent.squash() {
        return Err(ConfigurationError::IncompatibleSquashWithFastForwardOnly);
    }

    Ok(MergeSnapshot {
        revisions: revisions.to_vec(),
        message: intent.message().map(str::to_string),
        strategy: intent.strategy(),
        fast_forward_mode: intent.fast_forward_mode(),
        squash: intent.squash(),
        commit: intent.commit(),
    })
}

/// Combination that passes validation but that git is known to refuse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeLint {
    /// git rejects `--squash` together with `--no-ff`
    SquashWithNoFastForward,
}

impl std::fmt::Display for MergeLint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SquashWithNoFastForward => {
                write!(f, "git refuses --squash with --no-ff; expect a tool error")
            }
        }
    }
}

/// Advisory checks on a validated snapshot
///
/// Lints never block execution.
pub fn lint_intent(snapshot: &MergeSnapshot) -> Vec<MergeLint> {
    let mut lints = Vec::new();
    if snapshot.squash() && snapshot.fast_forward_mode() == FastForwardMode::NoFf {
        lints.push(MergeLint::SquashWithNoFastForward);
    }
    lints
}
