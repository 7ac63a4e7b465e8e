// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-developer statistics
//!
//! The caller filters history to one developer (usually with an author
//! filter on the git query); everything here is a fold over those records.

use gitscope_git::CommitRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extension::extension_histogram;

/// Length of the most-active-files list
pub const MOST_ACTIVE_FILES_LIMIT: usize = 20;

/// Number of extensions kept in the histogram
pub const FILE_TYPES_LIMIT: usize = 10;

/// Activity on one path by one developer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileActivity {
    /// Repository-relative path
    pub path: String,
    /// Number of commits that touched the path
    pub commits: usize,
    /// Lines added across those commits
    pub additions: u64,
    /// Lines deleted across those commits
    pub deletions: u64,
}

/// Totals and rankings for one developer's commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperStats {
    /// Number of commits
    pub total_commits: usize,
    /// Sum of per-commit file counts (a path touched twice counts twice)
    pub total_files_changed: usize,
    /// Lines added
    pub total_additions: u64,
    /// Lines deleted
    pub total_deletions: u64,
    /// Up to 20 paths, most commits first
    pub most_active_files: Vec<FileActivity>,
    /// Up to 10 extensions over distinct paths, most common first
    pub file_types: IndexMap<String, usize>,
}

impl DeveloperStats {
    /// Additions plus deletions
    #[must_use]
    pub fn activity_score(&self) -> u64 {
        self.total_additions.saturating_add(self.total_deletions)
    }
}

/// Fold one developer's commits into [`DeveloperStats`]
///
/// Empty input yields zeroed totals and empty collections.
#[must_use]
pub fn analyze_developer(commits: &[CommitRecord]) -> DeveloperStats {
    let mut stats = DeveloperStats {
        total_commits: commits.len(),
        ..Default::default()
    };

    let mut files: IndexMap<&str, FileActivity> = IndexMap::new();

    for commit in commits {
        let commit_stats = commit.stats();
        stats.total_files_changed += commit_stats.total_files;
        stats.total_additions = stats.total_additions.saturating_add(commit_stats.total_additions);
        stats.total_deletions = stats.total_deletions.saturating_add(commit_stats.total_deletions);

        for change in commit.files() {
            let entry = files
                .entry(change.path.as_str())
                .or_insert_with(|| FileActivity {
                    path: change.path.clone(),
                    ..Default::default()
                });
            entry.commits += 1;
            entry.additions = entry.additions.saturating_add(change.additions);
            entry.deletions = entry.deletions.saturating_add(change.deletions);
        }
    }

    stats.file_types = extension_histogram(files.keys().copied(), FILE_TYPES_LIMIT);

    let mut most_active: Vec<FileActivity> = files.into_values().collect();
    most_active.sort_by(|a, b| b.commits.cmp(&a.commits));
    most_active.truncate(MOST_ACTIVE_FILES_LIMIT);
    stats.most_active_files = most_active;

    stats
}
