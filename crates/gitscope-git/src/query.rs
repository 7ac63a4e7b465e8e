// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Argument lists for the git queries whose output the parsers consume

use serde::{Deserialize, Serialize};

use crate::log::LOG_PRETTY_FORMAT;

/// Filters for a repository-wide history query
///
/// Date filters are passed to git verbatim, so relative forms such as
/// `"2 weeks ago"` work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQuery {
    /// Branch to walk; `None` walks every ref (`--all`)
    pub branch: Option<String>,
    /// Maximum number of commits
    pub max_count: Option<usize>,
    /// Only commits after this date
    pub since: Option<String>,
    /// Only commits before this date
    pub until: Option<String>,
    /// Author name or email pattern
    pub author: Option<String>,
}

impl LogQuery {
    /// Create a query for the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            max_count: Some(n),
            ..Default::default()
        }
    }

    /// Restrict to one branch
    #[must_use]
    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: impl Into<String>) -> Self {
        self.since = Some(date.into());
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: impl Into<String>) -> Self {
        self.until = Some(date.into());
        self
    }

    /// Filter by author
    #[must_use]
    pub fn by_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Build the `git log` arguments
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--numstat".to_string(),
            LOG_PRETTY_FORMAT.to_string(),
        ];

        args.push(self.branch.clone().unwrap_or_else(|| "--all".to_string()));

        if let Some(n) = self.max_count.filter(|n| *n > 0) {
            args.push(format!("-{n}"));
        }
        if let Some(since) = &self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(until) = &self.until {
            args.push(format!("--until={until}"));
        }
        if let Some(author) = &self.author {
            args.push(format!("--author={author}"));
        }

        args
    }
}

/// Filters for the rename-following history of one path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistoryQuery {
    /// Repository-relative path
    pub path: String,
    /// Only commits after this date
    pub since: Option<String>,
    /// Only commits before this date
    pub until: Option<String>,
    /// Maximum number of commits
    pub max_count: Option<usize>,
}

impl FileHistoryQuery {
    /// History of `path` with no other filters
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Build the `git log --follow` arguments
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--follow".to_string(),
            "--numstat".to_string(),
            LOG_PRETTY_FORMAT.to_string(),
        ];

        if let Some(n) = self.max_count.filter(|n| *n > 0) {
            args.push(format!("-{n}"));
        }
        if let Some(since) = &self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(until) = &self.until {
            args.push(format!("--until={until}"));
        }

        args.push("--".to_string());
        args.push(self.path.clone());
        args
    }
}

/// `git branch` listing, most recently committed first
#[must_use]
pub fn branch_list_args() -> Vec<String> {
    [
        "branch",
        "--all",
        "--format=%(refname:short)|%(committerdate:iso8601)",
        "--sort=-committerdate",
    ]
    .map(String::from)
    .to_vec()
}

/// Short status with the branch-tracking header line
#[must_use]
pub fn status_args() -> Vec<String> {
    ["status", "--branch", "--short"].map(String::from).to_vec()
}

/// Fetch every remote, pruning deleted branches
#[must_use]
pub fn fetch_args() -> Vec<String> {
    ["fetch", "--all", "--prune", "--verbose"]
        .map(String::from)
        .to_vec()
}

/// Pull into the current branch
#[must_use]
pub fn pull_args() -> Vec<String> {
    ["pull", "--verbose"].map(String::from).to_vec()
}

/// Switch to `branch` before pulling
#[must_use]
pub fn checkout_args(branch: &str) -> Vec<String> {
    vec!["checkout".to_string(), branch.to_string()]
}
