//! Configuration loaded from `config.toml`
//!
//! Lookup order: an explicit path, then `$GMI_CONFIG`, then
//! `<config dir>/gmi/config.toml`. A missing default file yields defaults;
//! a missing user-named file, or one that doesn't parse, is an error.

use crate::error::{Error, Result};
use crate::types::{FastForwardMode, Strategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GMI_CONFIG";

/// Directory name under the platform config directory
const CONFIG_DIR: &str = "gmi";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How the merge tool is launched
    pub runner: RunnerConfig,
    /// Defaults applied by the CLI when flags are absent
    pub defaults: MergeDefaults,
}

/// Process runner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// git binary, looked up on `PATH` when relative
    pub program: PathBuf,
    /// Kill the tool after this many seconds (0 or absent: no limit)
    pub timeout_secs: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            timeout_secs: None,
        }
    }
}

impl RunnerConfig {
    /// Timeout as a `Duration`, `None` when unlimited
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Merge option defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeDefaults {
    /// Strategy used when `--strategy` is not given
    pub strategy: Strategy,
    /// Fast-forward mode used when no fast-forward flag is given
    pub fast_forward_mode: FastForwardMode,
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// A config file location and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// File to read
    pub path: PathBuf,
    /// Named by the user (`--config` or `$GMI_CONFIG`) rather than the
    /// platform default
    pub user_supplied: bool,
}

/// Resolve which config file to read
///
/// An explicit path wins, then `$GMI_CONFIG`, then the platform default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<ConfigLocation> {
    if let Some(path) = explicit {
        return Some(ConfigLocation {
            path: path.to_path_buf(),
            user_supplied: true,
        });
    }
    if let Some(from_env) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(ConfigLocation {
            path: PathBuf::from(from_env),
            user_supplied: true,
        });
    }
    default_config_path().map(|path| ConfigLocation {
        path,
        user_supplied: false,
    })
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| Error::Config(format!("invalid config: {e}")))
}

/// Load configuration
///
/// Returns defaults if the platform default file doesn't exist. A file named
/// by `--config` or `$GMI_CONFIG` that doesn't exist is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let Some(ConfigLocation {
        path,
        user_supplied,
    }) = resolve_config_path(explicit)
    else {
        return Ok(Config::default());
    };

    if !path.exists() {
        if user_supplied {
            return Err(Error::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}
