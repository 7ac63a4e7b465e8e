// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Branch listing parser
//!
//! Parses `git branch --all --format=%(refname:short)|%(committerdate:iso8601)`.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A branch and the date of its most recent commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    /// Short ref name (`main`, `origin/feature-x`)
    pub name: String,
    /// Committer date of the tip, as printed by git
    pub last_commit_date: String,
}

/// Parse one `name|date` line per branch
///
/// Blank lines and lines without two non-empty fields are dropped. Order is
/// preserved exactly as git printed it.
#[must_use]
pub fn parse_branches(raw: &str) -> Vec<BranchRecord> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let parsed = line.split_once('|').and_then(|(name, date)| {
                let (name, date) = (name.trim(), date.trim());
                (!name.is_empty() && !date.is_empty()).then(|| BranchRecord {
                    name: name.to_string(),
                    last_commit_date: date.to_string(),
                })
            });
            if parsed.is_none() {
                debug!(line, "Dropping malformed branch line");
            }
            parsed
        })
        .collect()
}
