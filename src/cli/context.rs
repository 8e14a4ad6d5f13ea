//! Shared command context for CLI commands
//!
//! Extracts the setup every command needs: configuration, the working
//! context, and the git runner.

use git_merge_intent::config::{Config, load_config};
use git_merge_intent::error::{Error, Result};
use git_merge_intent::exec::{GitRunner, WorkingContext};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Shared context for CLI commands
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Repository the merge is applied to
    pub working: WorkingContext,
    /// Runner built from config and command-line overrides
    pub runner: GitRunner,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Load config (explicit file, `$GMI_CONFIG`, or platform default)
    /// - Check the working directory exists
    /// - Build the runner, applying a command-line timeout over the config one
    pub fn new(path: &Path, config_path: Option<&Path>, timeout_secs: Option<u64>) -> Result<Self> {
        let config = load_config(config_path)?;
        debug!(?config, "loaded configuration");

        if !path.is_dir() {
            return Err(Error::Config(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut runner = GitRunner::from_config(&config.runner);
        if let Some(secs) = timeout_secs.filter(|secs| *secs > 0) {
            runner = runner.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            config,
            working: WorkingContext::new(path),
            runner,
        })
    }
}
