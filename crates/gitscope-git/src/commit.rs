// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit record types produced by the log parsers

use serde::{Deserialize, Serialize};

/// Metadata carried on a `COMMIT|` sentinel line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitHeader {
    /// Commit hash (opaque, usually 40 hex characters)
    pub hash: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author date as reported by git (`%ai`, ISO 8601 with offset)
    pub date: String,
    /// Subject line, kept verbatim (may contain `|`)
    pub message: String,
}

impl CommitHeader {
    /// The `Name <email>` identity used in summaries
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{} <{}>", self.author_name, self.author_email)
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(i, _)| i);
        &self.hash[..end]
    }
}

/// Line counts for one path within one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Repository-relative path
    pub path: String,
    /// Lines added (0 for binary files)
    pub additions: u64,
    /// Lines deleted (0 for binary files)
    pub deletions: u64,
}

impl FileChange {
    /// Additions plus deletions, saturating at `u64::MAX`
    #[must_use]
    pub fn churn(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// Per-commit totals derived from the file changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    /// Number of file change entries
    pub total_files: usize,
    /// Sum of additions
    pub total_additions: u64,
    /// Sum of deletions
    pub total_deletions: u64,
}

impl CommitStats {
    /// Compute totals over a set of file changes
    ///
    /// Sums saturate, so absurd numstat counts cannot overflow.
    #[must_use]
    pub fn from_changes(files: &[FileChange]) -> Self {
        Self {
            total_files: files.len(),
            total_additions: files.iter().fold(0, |acc, f| acc.saturating_add(f.additions)),
            total_deletions: files.iter().fold(0, |acc, f| acc.saturating_add(f.deletions)),
        }
    }
}

/// A parsed commit with its numstat entries
///
/// `stats` is always derived from `files`; the only way to build a record
/// is [`CommitRecord::new`], so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    #[serde(flatten)]
    header: CommitHeader,
    files: Vec<FileChange>,
    stats: CommitStats,
}

impl CommitRecord {
    /// Close out a record, computing its stats
    #[must_use]
    pub fn new(header: CommitHeader, files: Vec<FileChange>) -> Self {
        let stats = CommitStats::from_changes(&files);
        Self {
            header,
            files,
            stats,
        }
    }

    /// Sentinel metadata
    #[must_use]
    pub fn header(&self) -> &CommitHeader {
        &self.header
    }

    /// Commit hash
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.header.hash
    }

    /// Author name
    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.header.author_name
    }

    /// Author email
    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.header.author_email
    }

    /// Author date string as reported by git
    #[must_use]
    pub fn date(&self) -> &str {
        &self.header.date
    }

    /// Subject line
    #[must_use]
    pub fn message(&self) -> &str {
        &self.header.message
    }

    /// File changes in the order git reported them
    #[must_use]
    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    /// Derived totals
    #[must_use]
    pub fn stats(&self) -> CommitStats {
        self.stats
    }

    /// True when the commit touched no files (e.g. a merge)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// The single numstat entry of a file-history record
///
/// `file_path` is `None` when git printed no numstat line for the commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistoryChange {
    /// Lines added
    pub additions: u64,
    /// Lines deleted
    pub deletions: u64,
    /// Path at this commit (changes across renames)
    pub file_path: Option<String>,
}

/// One commit in the history of a single path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistoryRecord {
    /// Sentinel metadata
    #[serde(flatten)]
    pub header: CommitHeader,
    /// The change to the followed path
    pub changes: FileHistoryChange,
}
