//! Outcome classification - raw tool output to a typed outcome
//!
//! Exit status is read first, then textual markers in the combined output.
//! Anything unrecognized is a tool error, never a success.

use crate::exec::{ExitSignal, RawOutput};
use crate::types::OutcomeKind;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Duration;

// Markers are matched at the start of a line. Diffstat lines are indented,
// so a path that happens to contain marker text never matches.
const UP_TO_DATE_MARKERS: [&str; 2] = ["Already up to date", "Already up-to-date"];
const SQUASH_MARKER: &str = "Squash commit -- not updating HEAD";
const FAST_FORWARD_MARKER: &str = "Fast-forward";
const NOT_FAST_FORWARD_MARKER: &str = "fatal: Not possible to fast-forward";
const CONFLICT_MARKERS: [&str; 2] = ["CONFLICT (", "Automatic merge failed"];

static CONFLICT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^CONFLICT \([^)]*\): Merge conflict in (.+?)\s*$")
        .unwrap_or_else(|e| unreachable!("conflict path pattern is valid: {e}"))
});

/// Classify a raw tool result (PURE)
pub fn classify_outcome(raw: &RawOutput) -> OutcomeKind {
    let code = match raw.status {
        ExitSignal::Exited(code) => code,
        ExitSignal::Signaled | ExitSignal::TimedOut => return OutcomeKind::ToolError,
    };

    let starts = |marker: &str| output_lines(raw).any(|line| line.starts_with(marker));
    let is = |marker: &str| output_lines(raw).any(|line| line == marker);

    if code == 0 {
        if UP_TO_DATE_MARKERS.into_iter().any(starts) {
            OutcomeKind::AlreadyUpToDate
        } else if is(SQUASH_MARKER) {
            // A squash may print "Fast-forward" but never moves HEAD
            OutcomeKind::Success
        } else if is(FAST_FORWARD_MARKER) {
            OutcomeKind::FastForwarded
        } else {
            OutcomeKind::Success
        }
    } else if starts(NOT_FAST_FORWARD_MARKER) {
        OutcomeKind::AbortedFastForwardOnly
    } else if CONFLICT_MARKERS.into_iter().any(starts) {
        OutcomeKind::Conflict
    } else {
        OutcomeKind::ToolError
    }
}

fn output_lines(raw: &RawOutput) -> impl Iterator<Item = &str> {
    raw.stdout
        .lines()
        .chain(raw.stderr.lines())
        .map(str::trim_end)
}

/// Paths reported as content conflicts, in the order git printed them
pub fn conflicted_paths(raw: &RawOutput) -> Vec<String> {
    CONFLICT_PATH
        .captures_iter(&raw.stdout)
        .chain(CONFLICT_PATH.captures_iter(&raw.stderr))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Result of executing a merge intent
///
/// Conflicts and tool failures are ordinary values here; the captured
/// output is kept for the caller to inspect or log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Classified outcome
    pub kind: OutcomeKind,
    /// Exit code of the last tool run, if it exited normally
    pub exit_code: Option<i32>,
    /// Whether the last tool run was killed for exceeding the timeout
    pub timed_out: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Paths git reported as conflicted
    pub conflicted_paths: Vec<String>,
    /// Total time spent in the tool
    #[serde(serialize_with = "serialize_millis", rename = "duration_ms")]
    pub duration: Duration,
}

impl MergeOutcome {
    /// Classify a raw result and keep its diagnostics
    pub fn from_raw(raw: RawOutput) -> Self {
        let kind = classify_outcome(&raw);
        let conflicted_paths = if kind == OutcomeKind::Conflict {
            conflicted_paths(&raw)
        } else {
            Vec::new()
        };
        Self {
            kind,
            exit_code: raw.exit_code(),
            timed_out: raw.status == ExitSignal::TimedOut,
            stdout: raw.stdout,
            stderr: raw.stderr,
            conflicted_paths,
            duration: raw.duration,
        }
    }

    /// Whether the working context ended in a clean, merged state
    pub const fn is_clean(&self) -> bool {
        self.kind.is_clean()
    }

    /// Captured stdout and stderr, trimmed and joined
    pub fn diagnostics(&self) -> String {
        [self.stdout.trim(), self.stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
