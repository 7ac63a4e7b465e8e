// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitscope-git

use thiserror::Error;

/// Errors that can occur while locating a repository or running git
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started
    #[error("Git not found in PATH. Please install git.")]
    GitNotFound,

    /// An empty repository path was supplied
    #[error("Repository path must be a non-empty string")]
    InvalidPath {
        /// The offending path
        path: String,
    },

    /// Repository not found at the specified path
    #[error("Not a valid git repository: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Git exited with a non-zero status
    #[error("git {command} failed: {stderr}")]
    CommandFailed {
        /// The git arguments, space separated
        command: String,
        /// Trimmed standard error of the failed command
        stderr: String,
    },

    /// Git did not finish within the configured timeout
    #[error("git {command} timed out after {seconds} seconds")]
    Timeout {
        /// The git arguments, space separated
        command: String,
        /// The timeout that expired
        seconds: u64,
    },

    /// I/O error while talking to the child process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
