// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the gitscope-mcp server
//!
//! This module provides configuration types and utilities for the MCP server,
//! including the default repository, git execution settings and logging
//! options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use gitscope_git::GitRunner;
use gitscope_git::runner::DEFAULT_TIMEOUT;

/// Gitscope MCP Server - repository activity analytics over git history
#[derive(Parser, Debug, Clone)]
#[command(name = "gitscope-mcp")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to MCP server mode)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Default repository for tool calls
    ///
    /// Used when a tool call does not supply `repo_path`.
    #[arg(short, long, env = "GITSCOPE_REPO")]
    pub repo: Option<PathBuf>,

    /// Git executable to run
    ///
    /// Defaults to `git` found on PATH.
    #[arg(short, long, env = "GITSCOPE_GIT")]
    pub git: Option<PathBuf>,

    /// Timeout for each git command, in seconds
    #[arg(short, long, env = "GITSCOPE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr to avoid interfering with MCP stdio
    /// transport.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: None,
            repo: None,
            git: None,
            timeout: DEFAULT_TIMEOUT.as_secs(),
            verbose: false,
            quiet: false,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one tool and print its JSON result
    ///
    /// Example:
    ///   gitscope-mcp --repo . run get_commit_history '{"max_count": 5}'
    Run {
        /// Tool name, e.g. `get_project_dashboard`
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
}

impl Config {
    /// Build the git runner described by this configuration
    #[must_use]
    pub fn runner(&self) -> GitRunner {
        let runner = GitRunner::new().with_timeout(Duration::from_secs(self.timeout));
        match &self.git {
            Some(program) => runner.with_program(program),
            None => runner,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The default repository is specified but doesn't exist
    /// - The default repository is not a directory
    /// - The timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepositoryNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepositoryNotDirectory(repo.clone()));
            }
        }

        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Default repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Default repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),

    /// A zero timeout would fail every git command
    #[error("Git timeout must be at least 1 second")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.repo.is_none());
        assert!(config.git.is_none());
        assert_eq!(config.timeout, 60);
        assert!(!config.verbose);
        assert!(!config.quiet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_runner_from_config() {
        let config = Config {
            git: Some(PathBuf::from("/opt/git/bin/git")),
            timeout: 5,
            ..Default::default()
        };
        let runner = config.runner();
        assert_eq!(runner.program(), Path::new("/opt/git/bin/git"));
        assert_eq!(runner.timeout(), Duration::from_secs(5));

        let runner = Config::default().runner();
        assert_eq!(runner.program(), Path::new("git"));
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::RepositoryNotFound(_))));
    }

    #[test]
    fn test_validate_repo_is_file() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let config = Config {
            repo: Some(manifest),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RepositoryNotDirectory(_))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            timeout: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_validate_valid_repo_dir() {
        let config = Config {
            repo: Some(std::env::temp_dir()),
            ..Default::default()
        };
        // Only the directory is checked here; repository discovery happens per call
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
