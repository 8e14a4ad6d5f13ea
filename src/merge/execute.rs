//! Merge execution - effectful operations
//!
//! Takes a validated snapshot, renders it, hands it to a [`ToolRunner`] and
//! classifies what came back. Nothing is retried.

use crate::error::Result;
use crate::exec::{ExitSignal, RawOutput, ToolRunner, WorkingContext};
use crate::merge::classify::MergeOutcome;
use crate::merge::translate::{render_args, render_squash_commit_args};
use crate::merge::validate::{MergeSnapshot, lint_intent};
use crate::types::OutcomeKind;
use tracing::{debug, info, warn};

/// Execute a validated merge (EFFECTFUL)
///
/// For a squash that should be committed, a successful merge is followed by
/// a `commit`; if that commit fails the outcome is [`OutcomeKind::ToolError`]
/// with both runs' output kept.
///
/// # Returns
/// The classified outcome, or a launch failure if the tool couldn't start
pub fn execute_merge(
    snapshot: &MergeSnapshot,
    context: &WorkingContext,
    runner: &dyn ToolRunner,
) -> Result<MergeOutcome> {
    for lint in lint_intent(snapshot) {
        warn!("{lint}");
    }

    let args = render_args(snapshot);
    debug!(cwd = %context.root().display(), "git {}", args.join(" "));

    let raw = runner.run(&args, context)?;
    let mut outcome = MergeOutcome::from_raw(raw);

    if outcome.kind == OutcomeKind::Success
        && let Some(commit_args) = render_squash_commit_args(snapshot)
    {
        debug!("committing squashed result: git {}", commit_args.join(" "));
        let commit_raw = runner.run(&commit_args, context)?;
        outcome = fold_squash_commit(outcome, commit_raw);
    }

    info!(
        outcome = %outcome.kind,
        exit_code = ?outcome.exit_code,
        revisions = snapshot.revisions().len(),
        "merge finished"
    );

    Ok(outcome)
}

/// Combine the squash merge outcome with the follow-up commit's result
fn fold_squash_commit(merge: MergeOutcome, commit: RawOutput) -> MergeOutcome {
    let kind = if commit.success() {
        OutcomeKind::Success
    } else {
        OutcomeKind::ToolError
    };

    MergeOutcome {
        kind,
        exit_code: commit.exit_code(),
        timed_out: commit.status == ExitSignal::TimedOut,
        stdout: join_output(&merge.stdout, &commit.stdout),
        stderr: join_output(&merge.stderr, &commit.stderr),
        conflicted_paths: Vec::new(),
        duration: merge.duration + commit.duration,
    }
}

fn join_output(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ if first.ends_with('\n') => format!("{first}{second}"),
        _ => format!("{first}\n{second}"),
    }
}
