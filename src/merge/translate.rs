//! Invocation translation - snapshot to git arguments
//!
//! Token order is fixed: subcommand, strategy, fast-forward, squash,
//! commit, message, then revisions primary first.

use crate::merge::validate::MergeSnapshot;
use crate::types::Strategy;

/// Render the `git merge` argument list for a snapshot (PURE)
///
/// The strategy flag is left out for [`Strategy::Default`] so the tool
/// chooses. With squash and commit both set no commit flag is emitted,
/// since git itself refuses `--squash --commit`; the commit comes from
/// [`render_squash_commit_args`].
pub fn render_args(snapshot: &MergeSnapshot) -> Vec<String> {
    let mut args = vec!["merge".to_string()];

    if snapshot.strategy() != Strategy::Default {
        args.push(format!("--strategy={}", snapshot.strategy()));
    }

    args.push(snapshot.fast_forward_mode().as_flag().to_string());

    if snapshot.squash() {
        args.push("--squash".to_string());
    }

    if !snapshot.commit() {
        args.push("--no-commit".to_string());
    } else if !snapshot.squash() {
        args.push("--commit".to_string());
    }

    if let Some(message) = snapshot.message() {
        args.push("-m".to_string());
        args.push(message.to_string());
    }

    args.extend(snapshot.revisions().iter().map(|rev| rev.as_str().to_string()));
    args
}

/// Render the follow-up commit for a squash that should be committed
///
/// Returns `None` unless the snapshot squashes and commits. Without a
/// message the squash message git prepared is reused as-is.
pub fn render_squash_commit_args(snapshot: &MergeSnapshot) -> Option<Vec<String>> {
    if !snapshot.commits_squash() {
        return None;
    }

    let mut args = vec!["commit".to_string()];
    match snapshot.message() {
        Some(message) => {
            args.push("-m".to_string());
            args.push(message.to_string());
        }
        None => args.push("--no-edit".to_string()),
    }
    Some(args)
}
