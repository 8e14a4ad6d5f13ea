//! Core types for git-merge-intent

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A revision to merge
///
/// Opaque handle into the repository object graph: a full or abbreviated
/// object id, a ref name, or any revision expression the tool understands
/// (`HEAD~2`, `origin/main`). The text is passed to the tool verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Revision(String);

impl Revision {
    /// Parse a revision, rejecting text the tool would misread.
    ///
    /// Empty strings, embedded whitespace or NUL, and a leading `-` (which
    /// would be parsed as an option) are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::InvalidRevision("revision is empty".to_string()));
        }
        if text.starts_with('-') {
            return Err(Error::InvalidRevision(format!(
                "'{text}' looks like an option, not a revision"
            )));
        }
        if text.chars().any(|c| c.is_whitespace() || c == '\0') {
            return Err(Error::InvalidRevision(format!(
                "'{}' contains whitespace or control characters",
                text.escape_debug()
            )));
        }
        Ok(Self(text.to_string()))
    }

    /// The revision text as passed to the tool
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Revision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Revision {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Revision> for String {
    fn from(rev: Revision) -> Self {
        rev.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Merge strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Let the tool pick its own strategy
    #[default]
    Default,
    /// Three-way merge of exactly two heads
    Resolve,
    /// Recursive three-way merge
    Recursive,
    /// Merge of more than two heads at once
    Octopus,
    /// Keep our tree, record the others as parents
    Ours,
    /// Recursive merge with subtree shifting
    Subtree,
}

impl Strategy {
    /// All strategies, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::Resolve,
        Self::Recursive,
        Self::Octopus,
        Self::Ours,
        Self::Subtree,
    ];

    /// Lower-cased strategy name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Resolve => "resolve",
            Self::Recursive => "recursive",
            Self::Octopus => "octopus",
            Self::Ours => "ours",
            Self::Subtree => "subtree",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Config(format!("unknown merge strategy '{s}'")))
    }
}

/// Fast-forward policy
///
/// Named apart from the tool's own option to keep the three modes
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FastForwardMode {
    /// Fast-forward when possible, otherwise create a merge commit
    #[default]
    Ff,
    /// Refuse to merge unless the update is a fast-forward
    FfOnly,
    /// Always create a merge commit, even when a fast-forward is possible
    NoFf,
}

impl FastForwardMode {
    /// All modes, in declaration order
    pub const ALL: [Self; 3] = [Self::Ff, Self::FfOnly, Self::NoFf];

    /// The tool flag for this mode
    pub const fn as_flag(self) -> &'static str {
        match self {
            Self::Ff => "--ff",
            Self::FfOnly => "--ff-only",
            Self::NoFf => "--no-ff",
        }
    }
}

impl std::fmt::Display for FastForwardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_flag())
    }
}

impl FromStr for FastForwardMode {
    type Err = Error;

    /// Accepts the flag (`--ff-only`) or the bare name (`ff-only`, `ff_only`)
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim_start_matches("--").replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_flag()[2..].eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::Config(format!("unknown fast-forward mode '{s}'")))
    }
}

/// Classified result of a merge run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Merge completed and produced a new commit (or staged squash result)
    Success,
    /// No new commit; the branch pointer moved forward
    FastForwarded,
    /// Target already contains every source revision
    AlreadyUpToDate,
    /// Merge stopped with unresolved overlapping changes
    Conflict,
    /// Fast-forward only was requested but the histories have diverged
    AbortedFastForwardOnly,
    /// Any other failure, including timeouts and signal termination
    ToolError,
}

impl OutcomeKind {
    /// Whether the working context ended in a clean, merged state
    pub const fn is_clean(self) -> bool {
        matches!(
            self,
            Self::Success | Self::FastForwarded | Self::AlreadyUpToDate
        )
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "merged"),
            Self::FastForwarded => write!(f, "fast-forwarded"),
            Self::AlreadyUpToDate => write!(f, "already up to date"),
            Self::Conflict => write!(f, "conflict"),
            Self::AbortedFastForwardOnly => write!(f, "aborted (not a fast-forward)"),
            Self::ToolError => write!(f, "tool error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_renders_lower_case() {
        assert_eq!(Strategy::Recursive.to_string(), "recursive");
        assert_eq!(Strategy::Octopus.to_string(), "octopus");
        assert_eq!(Strategy::Default.to_string(), "default");
    }

    #[test]
    fn test_fast_forward_mode_renders_flags() {
        assert_eq!(FastForwardMode::Ff.to_string(), "--ff");
        assert_eq!(FastForwardMode::FfOnly.to_string(), "--ff-only");
        assert_eq!(FastForwardMode::NoFf.to_string(), "--no-ff");
    }

    #[test]
    fn test_fast_forward_mode_parses_names_and_flags() {
        assert_eq!(
            "ff-only".parse::<FastForwardMode>().unwrap(),
            FastForwardMode::FfOnly
        );
        assert_eq!(
            "--no-ff".parse::<FastForwardMode>().unwrap(),
            FastForwardMode::NoFf
        );
        assert_eq!(
            "FF_ONLY".parse::<FastForwardMode>().unwrap(),
            FastForwardMode::FfOnly
        );
        assert!("sometimes".parse::<FastForwardMode>().is_err());
    }

    #[test]
    fn test_strategy_parse_is_case_insensitive() {
        assert_eq!("OURS".parse::<Strategy>().unwrap(), Strategy::Ours);
        assert!("theirs".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_revision_rejects_option_like_text() {
        assert!(matches!(
            Revision::parse("--upload-pack=evil"),
            Err(Error::InvalidRevision(_))
        ));
        assert!(Revision::parse("").is_err());
        assert!(Revision::parse("main branch").is_err());
        assert_eq!(Revision::parse("origin/main").unwrap().as_str(), "origin/main");
    }

    #[test]
    fn test_serde_uses_config_spellings() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: Strategy,
            mode: FastForwardMode,
        }
        let parsed: Wrapper = toml::from_str("strategy = \"subtree\"\nmode = \"no-ff\"").unwrap();
        assert_eq!(parsed.strategy, Strategy::Subtree);
        assert_eq!(parsed.mode, FastForwardMode::NoFf);
    }
}
