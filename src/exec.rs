//! Tool invocation
//!
//! The merge engine only depends on the [`ToolRunner`] trait: "run the tool
//! with these arguments in this working context, return exit status and
//! captured text". [`GitRunner`] is the process-backed implementation.

use crate::config::RunnerConfig;
use crate::error::LaunchFailure;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Repository working context a merge is applied to
///
/// Owned by the caller; constructing one does not touch the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingContext {
    root: PathBuf,
}

impl WorkingContext {
    /// Create a context rooted at a repository working tree
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root of the working tree
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// How the tool process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// Exited normally with this status code
    Exited(i32),
    /// Terminated by a signal before exiting
    Signaled,
    /// Killed after exceeding the runner timeout
    TimedOut,
}

impl From<ExitStatus> for ExitSignal {
    fn from(status: ExitStatus) -> Self {
        status.code().map_or(Self::Signaled, Self::Exited)
    }
}

/// Uninterpreted result of one tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// How the process ended
    pub status: ExitSignal,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl RawOutput {
    /// Build an output record with a zero duration
    pub fn new(status: ExitSignal, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
        }
    }

    /// Exit code, if the process exited normally
    pub const fn exit_code(&self) -> Option<i32> {
        match self.status {
            ExitSignal::Exited(code) => Some(code),
            ExitSignal::Signaled | ExitSignal::TimedOut => None,
        }
    }

    /// Whether the process exited with status 0
    pub const fn success(&self) -> bool {
        matches!(self.status, ExitSignal::Exited(0))
    }
}

/// Capability to run the merge tool
///
/// Implementations block the calling thread until the tool finishes and do
/// not interpret its output.
pub trait ToolRunner: Send + Sync {
    /// Run the tool with `args` inside `context`
    fn run(&self, args: &[String], context: &WorkingContext) -> Result<RawOutput, LaunchFailure>;
}

/// Runs the `git` command-line tool as a child process
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            timeout: None,
        }
    }
}

impl GitRunner {
    /// Runner for `git` on `PATH` with no timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a runner from configuration
    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            program: config.program.clone(),
            timeout: config.timeout(),
        }
    }

    /// Use a different git binary
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill the tool if it runs longer than `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configured program
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Configured timeout
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn launch_failure(&self, source: std::io::Error) -> LaunchFailure {
        LaunchFailure {
            program: self.program.clone(),
            source,
        }
    }
}

impl ToolRunner for GitRunner {
    fn run(&self, args: &[String], context: &WorkingContext) -> Result<RawOutput, LaunchFailure> {
        debug!(
            program = %self.program.display(),
            cwd = %context.root().display(),
            "running {}",
            args.join(" ")
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(context.root())
            // Never block on a prompt or an editor; keep messages in English
            // so the classifier's markers match.
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_EDITOR", "true")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .env("LC_ALL", "C")
            .env("LANGUAGE", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Hooks, merge drivers and helpers git spawns join this group, so a
        // timeout can take all of them down and release the pipes.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|e| self.launch_failure(e))?;

        // Drain both pipes concurrently so a full pipe can't stall the child
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let started = Instant::now();
        let status = match self.timeout {
            Some(timeout) if !timeout.is_zero() => {
                match child.wait_timeout(timeout).map_err(|e| self.launch_failure(e))? {
                    Some(status) => ExitSignal::from(status),
                    None => {
                        warn!(
                            "{} timed out after {:?}, killing it",
                            self.program.display(),
                            timeout
                        );
                        kill_tree(&mut child);
                        if let Err(e) = child.wait() {
                            warn!("failed to reap {}: {e}", self.program.display());
                        }
                        ExitSignal::TimedOut
                    }
                }
            }
            _ => ExitSignal::from(child.wait().map_err(|e| self.launch_failure(e))?),
        };
        let duration = started.elapsed();

        let stdout = join_reader(stdout_reader).map_err(|e| self.launch_failure(e))?;
        let stderr = join_reader(stderr_reader).map_err(|e| self.launch_failure(e))?;

        debug!(?status, ?duration, "tool finished");

        Ok(RawOutput {
            status,
            stdout,
            stderr,
            duration,
        })
    }
}

/// Kill the child and every process in its group
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    match i32::try_from(child.id()) {
        Ok(pgid) => {
            if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                warn!("failed to kill process group {pgid}: {e}");
                kill_child(child);
            }
        }
        Err(_) => kill_child(child),
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    kill_child(child);
}

fn kill_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!("failed to kill pid {}: {e}", child.id());
    }
}

type Reader = JoinHandle<std::io::Result<String>>;

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

fn join_reader(reader: Reader) -> std::io::Result<String> {
    reader
        .join()
        .map_err(|_| std::io::Error::other("output reader thread panicked"))?
}
