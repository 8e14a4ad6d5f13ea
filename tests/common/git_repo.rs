//! Temporary git repositories for end-to-end tests

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Whether a usable `git` binary is on `PATH`
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// A throwaway repository on branch `main` with one initial commit
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Create the repository, or `None` when git isn't installed
    pub fn new() -> Option<Self> {
        if !git_available() {
            eprintln!("git not available, skipping");
            return None;
        }

        let repo = Self {
            dir: TempDir::new().unwrap(),
        };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "core.autocrlf", "false"]);
        repo.commit_file("README.md", "hello\n", "Initial commit");
        Some(repo)
    }

    /// Root of the working tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git, panicking on failure; returns trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Write a file and commit it
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        self.git(&["add", name]);
        self.git(&["commit", "-q", "-m", message]);
    }

    /// Create a branch at HEAD and switch to it
    pub fn branch(&self, name: &str) {
        self.git(&["checkout", "-q", "-b", name]);
    }

    /// Switch to an existing branch
    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", "-q", name]);
    }

    /// Commit id a revision resolves to
    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Number of parents of a commit
    pub fn parent_count(&self, rev: &str) -> usize {
        self.git(&["rev-list", "--parents", "-n", "1", rev])
            .split_whitespace()
            .count()
            - 1
    }

    /// Subject line of a commit
    pub fn subject(&self, rev: &str) -> String {
        self.git(&["log", "-1", "--format=%s", rev])
    }

    /// Whether a merge is in progress (MERGE_HEAD present)
    pub fn merge_in_progress(&self) -> bool {
        self.path().join(".git").join("MERGE_HEAD").exists()
    }

    /// Diverge `main` and `feature` so a fast-forward is impossible
    ///
    /// `overlap` makes both sides edit the same line of `shared.txt`.
    pub fn diverge(&self, overlap: bool) {
        if overlap {
            self.commit_file("shared.txt", "base\n", "Add shared file");
        }
        self.branch("feature");
        if overlap {
            self.commit_file("shared.txt", "feature side\n", "Feature edit");
        } else {
            self.commit_file("feature.txt", "feature\n", "Feature work");
        }
        self.checkout("main");
        if overlap {
            self.commit_file("shared.txt", "main side\n", "Main edit");
        } else {
            self.commit_file("main.txt", "main\n", "Main work");
        }
    }
}
