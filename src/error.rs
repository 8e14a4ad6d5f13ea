//! Error types for git-merge-intent

use std::path::PathBuf;
use thiserror::Error;

/// An intent whose options contradict each other
///
/// Raised before any process is started and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No revision was given to merge
    #[error("no revision specified to merge")]
    NoRevisionSpecified,

    /// More than one revision without the octopus strategy
    #[error("merging {count} revisions at once requires the octopus strategy")]
    MultiRevisionRequiresOctopus {
        /// Number of revisions in the intent
        count: usize,
    },

    /// Squash together with fast-forward only
    #[error("--squash cannot be combined with --ff-only")]
    IncompatibleSquashWithFastForwardOnly,
}

/// The tool could not be started, or its output could not be collected
#[derive(Debug, Error)]
#[error("failed to run {}: {source}", program.display())]
pub struct LaunchFailure {
    /// Program that was being launched
    pub program: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

impl LaunchFailure {
    /// Whether the program itself could not be found
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

/// Errors that can occur in git-merge-intent
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid merge configuration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Merge tool could not be launched
    #[error(transparent)]
    Launch(#[from] LaunchFailure),

    /// Revision text rejected before reaching the tool
    #[error("invalid revision: {0}")]
    InvalidRevision(String),

    /// Configuration file or value error
    #[error("config error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
