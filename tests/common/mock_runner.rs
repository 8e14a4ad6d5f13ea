//! Mock tool runner for testing

use git_merge_intent::error::LaunchFailure;
use git_merge_intent::exec::{ExitSignal, RawOutput, ToolRunner, WorkingContext};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// Call record for `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub args: Vec<String>,
    pub root: PathBuf,
}

/// Simple mock runner for testing
///
/// Features:
/// - Queued responses, replayed in order
/// - Call tracking for verification
/// - Launch failure injection
pub struct MockRunner {
    responses: Mutex<VecDeque<RawOutput>>,
    calls: Mutex<Vec<RunCall>>,
    launch_error: Mutex<Option<std::io::ErrorKind>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            launch_error: Mutex::new(None),
        }
    }

    /// Queue a normal exit with the given code and output
    pub fn push_exit(&self, code: i32, stdout: &str, stderr: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawOutput::new(ExitSignal::Exited(code), stdout, stderr));
    }

    /// Make every `run` fail to launch with this error kind
    pub fn fail_launch(&self, kind: std::io::ErrorKind) {
        *self.launch_error.lock().unwrap() = Some(kind);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RunCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times `run` was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, args: &[String], context: &WorkingContext) -> Result<RawOutput, LaunchFailure> {
        self.calls.lock().unwrap().push(RunCall {
            args: args.to_vec(),
            root: context.root().to_path_buf(),
        });

        if let Some(kind) = *self.launch_error.lock().unwrap() {
            return Err(LaunchFailure {
                program: PathBuf::from("git"),
                source: std::io::Error::from(kind),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockRunner: unexpected call with args {args:?}")))
    }
}
