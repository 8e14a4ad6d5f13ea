//! Merge command - validate, render and run one merge intent

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross, spinner_style};
use anstream::println;
use dialoguer::Confirm;
use git_merge_intent::config::MergeDefaults;
use git_merge_intent::error::{Error, Result};
use git_merge_intent::merge::{
    MergeIntent, MergeOutcome, MergeSnapshot, execute_merge, lint_intent, render_args,
    render_squash_commit_args,
};
use git_merge_intent::types::{FastForwardMode, OutcomeKind, Revision, Strategy};
use indicatif::ProgressBar;
use std::time::Duration;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeOptions {
    /// Revisions to merge, primary first
    pub revisions: Vec<String>,
    /// Strategy override (config default otherwise)
    pub strategy: Option<Strategy>,
    /// Fast-forward override (config default otherwise)
    pub fast_forward_mode: Option<FastForwardMode>,
    /// Squash the merged changes
    pub squash: bool,
    /// Stop before committing
    pub no_commit: bool,
    /// Commit message
    pub message: Option<String>,
    /// Dry run - show what would run without running it
    pub dry_run: bool,
    /// Preview the invocation and prompt before running it
    pub confirm: bool,
    /// Print the outcome as JSON
    pub json: bool,
}

/// Build an intent from command-line options and config defaults
pub fn build_intent(options: &MergeOptions, defaults: &MergeDefaults) -> Result<MergeIntent> {
    let mut intent = MergeIntent::new()
        .set_strategy(options.strategy.unwrap_or(defaults.strategy))
        .set_fast_forward_mode(
            options
                .fast_forward_mode
                .unwrap_or(defaults.fast_forward_mode),
        )
        .set_squash(options.squash)
        .set_commit(!options.no_commit);

    if let Some(ref message) = options.message {
        intent = intent.set_message(message.clone());
    }

    for (i, text) in options.revisions.iter().enumerate() {
        let rev = Revision::parse(text)?;
        intent = if i == 0 {
            intent.set_revision_to_merge(rev)
        } else {
            intent.add_revision_to_merge(rev)
        };
    }

    Ok(intent)
}

/// Run the merge command
///
/// Returns the outcome kind, or `None` when nothing was run (dry run or
/// declined confirmation).
pub fn run_merge(ctx: &CommandContext, options: &MergeOptions) -> Result<Option<OutcomeKind>> {
    let intent = build_intent(options, &ctx.config.defaults)?;
    let snapshot = intent.finalize()?;

    if options.dry_run {
        report_invocation(&snapshot);
        println!("{}", "Run without --dry-run to execute.".muted());
        return Ok(None);
    }

    if options.confirm {
        report_invocation(&snapshot);
        if !Confirm::new()
            .with_prompt("Proceed with merge?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(None);
        }
    }

    let spinner = (!options.json).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!("Merging {}...", revision_list(&snapshot).accent()));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let result = execute_merge(&snapshot, &ctx.working, &ctx.runner);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let outcome = result?;

    if options.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| Error::Internal(format!("Failed to serialize outcome: {e}")))?;
        println!("{json}");
    } else {
        print_outcome(&snapshot, &outcome);
    }

    Ok(Some(outcome.kind))
}

/// Print the git invocations a snapshot renders to
fn report_invocation(snapshot: &MergeSnapshot) {
    println!("{}:", "Merge plan".emphasis());
    println!();
    println!("  git {}", shell_words(&render_args(snapshot)).accent());
    if let Some(commit) = render_squash_commit_args(snapshot) {
        println!("  git {}", shell_words(&commit).accent());
    }
    for lint in lint_intent(snapshot) {
        println!("  {} {lint}", "⚠".warn());
    }
    println!();
}

/// Print a human-readable summary of the outcome
fn print_outcome(snapshot: &MergeSnapshot, outcome: &MergeOutcome) {
    let revs = revision_list(snapshot);
    match outcome.kind {
        OutcomeKind::Success => {
            let what = if snapshot.squash() && !snapshot.commit() {
                "Squashed (staged, not committed)"
            } else if snapshot.squash() {
                "Squashed and committed"
            } else {
                "Merged"
            };
            println!("{} {what} {}", check(), revs.accent());
        }
        OutcomeKind::FastForwarded => {
            println!("{} Fast-forwarded to {}", check(), revs.accent());
        }
        OutcomeKind::AlreadyUpToDate => {
            println!("{} Already up to date with {}", check(), revs.accent());
        }
        OutcomeKind::Conflict => {
            println!("{} Merge of {} stopped with conflicts", cross(), revs.accent());
            for path in &outcome.conflicted_paths {
                println!("    - {}", path.warn());
            }
            println!(
                "{}",
                "   Resolve the conflicts and commit, or run 'git merge --abort'.".muted()
            );
        }
        OutcomeKind::AbortedFastForwardOnly => {
            println!(
                "{} {} is not a fast-forward; nothing changed",
                cross(),
                revs.accent()
            );
            println!(
                "{}",
                "   Rebase first, or re-run without --ff-only.".muted()
            );
        }
        OutcomeKind::ToolError => {
            let reason = if outcome.timed_out {
                "timed out".to_string()
            } else {
                outcome
                    .exit_code
                    .map_or_else(|| "was terminated".to_string(), |c| format!("exited with {c}"))
            };
            println!("{} git {reason}", cross());
            let diagnostics = outcome.diagnostics();
            if !diagnostics.is_empty() {
                for line in diagnostics.lines() {
                    println!("   {}", line.muted());
                }
            }
        }
    }
}

fn revision_list(snapshot: &MergeSnapshot) -> String {
    snapshot
        .revisions()
        .iter()
        .map(Revision::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote arguments for display the way a POSIX shell would need them
fn shell_words(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            let plain = !arg.is_empty()
                && arg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_=./:~^@+,".contains(c));
            if plain {
                arg.clone()
            } else {
                format!("'{}'", arg.replace('\'', r"'\''"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
