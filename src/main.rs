//! gmi - declarative, validated git merges

mod cli;

use anstream::eprintln;
use clap::{Args, Parser, Subcommand};
use cli::style::Stylize;
use cli::{CommandContext, MergeOptions, run_merge};
use git_merge_intent::error::Error;
use git_merge_intent::types::{FastForwardMode, OutcomeKind, Strategy};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `debug`)
const LOG_ENV: &str = "GMI_LOG";

#[derive(Parser)]
#[command(name = "gmi")]
#[command(about = "Declarative, validated git merges with typed outcomes")]
#[command(version)]
struct Cli {
    /// Path to the repository working tree
    #[arg(short, long, global = true, default_value = ".")]
    path: PathBuf,

    /// Config file (defaults to $GMI_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log the git invocations
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge one or more revisions into the current branch
    Merge(MergeArgs),
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct MergeArgs {
    /// Revisions to merge; more than one requires --strategy octopus
    revisions: Vec<String>,

    /// Merge strategy (default, resolve, recursive, octopus, ours, subtree)
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Fast-forward when possible (default)
    #[arg(long, conflicts_with_all = ["ff_only", "no_ff"])]
    ff: bool,

    /// Refuse to merge unless it is a fast-forward
    #[arg(long, conflicts_with = "no_ff")]
    ff_only: bool,

    /// Always create a merge commit
    #[arg(long)]
    no_ff: bool,

    /// Squash the merged changes into one change set
    #[arg(long)]
    squash: bool,

    /// Stop before committing the result
    #[arg(long)]
    no_commit: bool,

    /// Commit message
    #[arg(short, long)]
    message: Option<String>,

    /// Kill git after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Show the git invocation without running it
    #[arg(long)]
    dry_run: bool,

    /// Preview the invocation and prompt before running it
    #[arg(long, conflicts_with = "dry_run")]
    confirm: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

impl MergeArgs {
    fn fast_forward_mode(&self) -> Option<FastForwardMode> {
        if self.ff_only {
            Some(FastForwardMode::FfOnly)
        } else if self.no_ff {
            Some(FastForwardMode::NoFf)
        } else if self.ff {
            Some(FastForwardMode::Ff)
        } else {
            None
        }
    }

    fn into_options(self) -> MergeOptions {
        MergeOptions {
            fast_forward_mode: self.fast_forward_mode(),
            revisions: self.revisions,
            strategy: self.strategy,
            squash: self.squash,
            no_commit: self.no_commit,
            message: self.message,
            dry_run: self.dry_run,
            confirm: self.confirm,
            json: self.json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit status for a classified outcome
const fn exit_code_for_outcome(kind: OutcomeKind) -> u8 {
    match kind {
        OutcomeKind::Success | OutcomeKind::FastForwarded | OutcomeKind::AlreadyUpToDate => 0,
        OutcomeKind::Conflict => 1,
        OutcomeKind::AbortedFastForwardOnly => 2,
        OutcomeKind::ToolError => 3,
    }
}

/// Exit status for an error that stopped the merge from running
const fn exit_code_for_error(err: &Error) -> u8 {
    match err {
        Error::Configuration(_) | Error::InvalidRevision(_) => 64,
        Error::Launch(_) => 127,
        Error::Config(_) | Error::Internal(_) => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Merge(args) => {
            let timeout = args.timeout;
            CommandContext::new(&cli.path, cli.config.as_deref(), timeout)
                .and_then(|ctx| run_merge(&ctx, &args.into_options()))
        }
    };

    match result {
        Ok(Some(kind)) => ExitCode::from(exit_code_for_outcome(kind)),
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".error());
            ExitCode::from(exit_code_for_error(&e))
        }
    }
}
