// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! `git log --numstat` output parsing
//!
//! Both the repository-wide history and the single-file history use the
//! same framing: a `COMMIT|` sentinel line opens a record and tab-separated
//! numstat lines that follow belong to it.
//!
//! ```text
//! COMMIT|<hash>|<author-name>|<author-email>|<iso8601-date>|<subject>
//! <additions>\t<deletions>\t<path>
//! ```
//!
//! Malformed lines are dropped rather than reported; a sentinel line with
//! the wrong number of fields discards the whole record it would have opened.

use tracing::debug;

use crate::commit::{CommitHeader, CommitRecord, FileChange, FileHistoryChange, FileHistoryRecord};

/// Prefix that marks the start of a record
pub const COMMIT_SENTINEL: &str = "COMMIT|";

/// The `--pretty` argument that produces sentinel lines
pub const LOG_PRETTY_FORMAT: &str = "--pretty=format:COMMIT|%H|%an|%ae|%ai|%s";

/// Marker git prints instead of line counts for binary files
const BINARY_MARKER: &str = "-";

/// Accumulates the lines of one record until the next sentinel
trait RecordBuilder: Sized {
    type Record;

    fn open(header: CommitHeader) -> Self;
    fn push(&mut self, change: FileChange);
    fn close(self) -> Self::Record;
}

/// Where the scanner is between lines
enum ScanState<B> {
    /// No record is open; data lines are ignored
    Idle,
    /// A record is open and collecting numstat lines
    Active(B),
}

struct CommitBuilder {
    header: CommitHeader,
    files: Vec<FileChange>,
}

impl RecordBuilder for CommitBuilder {
    type Record = CommitRecord;

    fn open(header: CommitHeader) -> Self {
        Self {
            header,
            files: Vec::new(),
        }
    }

    fn push(&mut self, change: FileChange) {
        self.files.push(change);
    }

    fn close(self) -> CommitRecord {
        CommitRecord::new(self.header, self.files)
    }
}

struct FileHistoryBuilder {
    header: CommitHeader,
    changes: FileHistoryChange,
}

impl RecordBuilder for FileHistoryBuilder {
    type Record = FileHistoryRecord;

    fn open(header: CommitHeader) -> Self {
        Self {
            header,
            changes: FileHistoryChange::default(),
        }
    }

    // Last numstat line wins
    fn push(&mut self, change: FileChange) {
        self.changes = FileHistoryChange {
            additions: change.additions,
            deletions: change.deletions,
            file_path: Some(change.path),
        };
    }

    fn close(self) -> FileHistoryRecord {
        FileHistoryRecord {
            header: self.header,
            changes: self.changes,
        }
    }
}

/// Parse repository history into commit records, most recent first
///
/// Records keep the order git printed them in. Commits without numstat
/// lines (merges) yield an empty file list.
///
/// # Example
///
/// ```
/// use gitscope_git::log::parse_commit_log;
///
/// let raw = "COMMIT|abc123|Jane|jane@example.com|2025-01-15 10:30:00 +0100|Fix | pipes\n\
///            10\t2\tsrc/main.rs\n\
///            -\t-\tlogo.png\n";
/// let commits = parse_commit_log(raw);
/// assert_eq!(commits.len(), 1);
/// assert_eq!(commits[0].message(), "Fix | pipes");
/// assert_eq!(commits[0].stats().total_additions, 10);
/// ```
#[must_use]
pub fn parse_commit_log(raw: &str) -> Vec<CommitRecord> {
    scan::<CommitBuilder>(raw)
}

/// Parse the `--follow` history of a single path
///
/// Each record carries exactly one change. When git printed no numstat
/// line for a commit the change is zeroed with no path.
#[must_use]
pub fn parse_file_history(raw: &str) -> Vec<FileHistoryRecord> {
    scan::<FileHistoryBuilder>(raw)
}

fn scan<B: RecordBuilder>(raw: &str) -> Vec<B::Record> {
    let mut records = Vec::new();
    let mut state: ScanState<B> = ScanState::Idle;

    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim();

        if line.starts_with(COMMIT_SENTINEL) {
            if let ScanState::Active(builder) = std::mem::replace(&mut state, ScanState::Idle) {
                records.push(builder.close());
            }
            match parse_header(line) {
                Some(header) => state = ScanState::Active(B::open(header)),
                None => debug!(line = lineno + 1, "Skipping malformed commit sentinel"),
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let ScanState::Active(builder) = &mut state {
            match parse_change(line) {
                Some(change) => builder.push(change),
                None => debug!(line = lineno + 1, "Ignoring non-numstat line"),
            }
        }
    }

    if let ScanState::Active(builder) = state {
        records.push(builder.close());
    }

    records
}

/// Split a sentinel line into its five fields
///
/// The subject is the remainder after the fifth `|` and may contain pipes.
fn parse_header(line: &str) -> Option<CommitHeader> {
    let parts: Vec<&str> = line.splitn(6, '|').collect();
    let [_, hash, author_name, author_email, date, message] = parts.as_slice() else {
        return None;
    };

    Some(CommitHeader {
        hash: hash.trim().to_string(),
        author_name: author_name.trim().to_string(),
        author_email: author_email.trim().to_string(),
        date: date.trim().to_string(),
        message: (*message).to_string(),
    })
}

/// Parse `<additions>\t<deletions>\t<path>`
fn parse_change(line: &str) -> Option<FileChange> {
    let parts: Vec<&str> = line.split('\t').collect();
    let [additions, deletions, path] = parts.as_slice() else {
        return None;
    };

    Some(FileChange {
        path: path.trim().to_string(),
        additions: parse_count(additions)?,
        deletions: parse_count(deletions)?,
    })
}

fn parse_count(field: &str) -> Option<u64> {
    let field = field.trim();
    if field == BINARY_MARKER {
        return Some(0);
    }
    field.parse().ok()
}
