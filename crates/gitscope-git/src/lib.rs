// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitscope-git: Git output parsing for gitscope
//!
//! This library crate runs the git command-line tool and turns its textual
//! output (history, single-file history, branch listings, fetch transcripts
//! and short status) into typed records for the gitscope analytics.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitscope_git::{GitRunner, LogQuery, ensure_repository, parse_commit_log};
//!
//! # async fn demo() -> Result<(), gitscope_git::GitError> {
//! let repo = ensure_repository(".")?;
//! let raw = GitRunner::new()
//!     .run(repo.as_path(), &LogQuery::latest(10).to_args())
//!     .await?;
//!
//! for c in parse_commit_log(&raw) {
//!     println!("{} - {}", c.header().short_hash(), c.message());
//! }
//! # Ok(())
//! # }
//! ```

pub mod branch;
pub mod commit;
pub mod error;
pub mod log;
pub mod query;
pub mod repo;
pub mod runner;
pub mod sync;

pub use branch::{BranchRecord, parse_branches};
pub use commit::{
    CommitHeader, CommitRecord, CommitStats, FileChange, FileHistoryChange, FileHistoryRecord,
};
pub use error::GitError;
pub use log::{parse_commit_log, parse_file_history};
pub use query::{FileHistoryQuery, LogQuery};
pub use repo::{RepoPath, ensure_repository};
pub use runner::{GitOutput, GitRunner};
pub use sync::{
    BranchUpdate, FetchSummary, StatusRecord, SyncStatus, UpdateAction, parse_fetch_output,
    parse_status_output,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{CommitRecord, FileChange, FileHistoryRecord};
    pub use crate::error::GitError;
    pub use crate::log::{parse_commit_log, parse_file_history};
    pub use crate::query::{FileHistoryQuery, LogQuery};
    pub use crate::repo::{RepoPath, ensure_repository};
    pub use crate::runner::GitRunner;
}
