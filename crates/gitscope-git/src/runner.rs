// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Execution of the git command-line tool
//!
//! Every query is a single non-interactive `git --no-pager ...` invocation
//! with a timeout. The parsers never see a process; they only see the text
//! this module returns.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Default per-command timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Captured output of a successful git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
}

impl GitOutput {
    /// Stdout followed by stderr
    ///
    /// Fetch and pull report ref updates on stderr, so transcripts for
    /// those commands need both streams.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }
}

/// Runs git commands against a repository
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: PathBuf,
    timeout: Duration,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GitRunner {
    /// Runner using `git` from `PATH` and the default timeout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the per-command timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured git executable
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The configured timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run git in `repo` and return its stdout
    ///
    /// # Errors
    ///
    /// See [`GitRunner::output`].
    pub async fn run<S: AsRef<str>>(&self, repo: &Path, args: &[S]) -> Result<String, GitError> {
        Ok(self.output(repo, args).await?.stdout)
    }

    /// Run git in `repo` and capture both streams
    ///
    /// # Errors
    ///
    /// - `GitError::GitNotFound` if the executable cannot be started
    /// - `GitError::Timeout` if the command runs longer than the timeout
    /// - `GitError::CommandFailed` if git exits with a non-zero status
    pub async fn output<S: AsRef<str>>(
        &self,
        repo: &Path,
        args: &[S],
    ) -> Result<GitOutput, GitError> {
        let command = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        debug!(repo = %repo.display(), %command, "Running git");
        let started = Instant::now();

        let child = Command::new(&self.program)
            .arg("--no-pager")
            .args(args.iter().map(AsRef::as_ref))
            .current_dir(repo)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_PAGER", "")
            .env("PAGER", "")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GitError::GitNotFound,
                _ => GitError::Io(e),
            })?;

        // Dropping the wait future on timeout kills the child
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| GitError::Timeout {
                command: command.clone(),
                seconds: self.timeout.as_secs(),
            })??;

        debug!(
            %command,
            status = ?output.status.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "git finished"
        );

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(GitOutput { stdout, stderr })
    }
}
