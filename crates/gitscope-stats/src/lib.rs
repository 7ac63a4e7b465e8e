// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitscope-stats: Repository analytics for gitscope
//!
//! This library crate folds parsed commit records into per-developer
//! statistics, cross-developer comparisons and the project dashboard. Every
//! analysis is a pure function of its input records.
//!
//! # Example
//!
//! ```
//! use gitscope_git::parse_commit_log;
//! use gitscope_stats::{analyze_dashboard, analyze_developer};
//!
//! let raw = "COMMIT|abc|Jane|jane@example.com|2025-01-15 10:30:00 +0100|Fix\n12\t3\tsrc/main.rs\n";
//! let commits = parse_commit_log(raw);
//!
//! let stats = analyze_developer(&commits);
//! assert_eq!(stats.total_additions, 12);
//!
//! let dashboard = analyze_dashboard(&commits);
//! assert_eq!(dashboard.executive_summary.total_developers, 1);
//! ```

pub mod compare;
pub mod dashboard;
pub mod developer;
pub mod error;
pub mod extension;

pub use compare::{ComparisonResult, DeveloperEntry, Ranking, compare_developers};
pub use dashboard::{DashboardResult, RiskLevel, Stability, analyze_dashboard};
pub use developer::{DeveloperStats, FileActivity, analyze_developer};
pub use error::{StatsError, validate_roster};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::compare::{ComparisonResult, DeveloperEntry, compare_developers};
    pub use crate::dashboard::{DashboardResult, analyze_dashboard};
    pub use crate::developer::{DeveloperStats, analyze_developer};
    pub use crate::error::{StatsError, validate_roster};
}
