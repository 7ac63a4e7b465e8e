// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Response envelopes returned by each tool
//!
//! Each assembler is a pure function of parsed records and the query that
//! produced them. Field names are part of the tool contract.

use std::collections::BTreeSet;

use gitscope_git::{
    BranchRecord, CommitRecord, FetchSummary, FileHistoryRecord, LogQuery, StatusRecord,
};
use gitscope_stats::compare::{ComparisonResult, DeveloperEntry, ScoredDeveloper};
use gitscope_stats::{DashboardResult, DeveloperStats};
use serde::Serialize;

/// Dashboard window used when the caller gives no `since`
pub const DEFAULT_DASHBOARD_SINCE: &str = "30 days ago";

/// Label reported when the caller gives no `until`
const OPEN_ENDED_UNTIL: &str = "now";

// ============================================================================
// Shared pieces
// ============================================================================

/// The repository a response describes, as the caller named it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    /// Path supplied by the caller (or the configured default)
    pub path: String,
}

impl RepoRef {
    /// Wrap a path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Date filters applied to a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    /// Lower bound passed to git
    pub since: Option<String>,
    /// Upper bound passed to git
    pub until: Option<String>,
}

/// Sorted, deduplicated `Name <email>` identities
fn identities<'a>(headers: impl Iterator<Item = &'a gitscope_git::CommitHeader>) -> Vec<String> {
    headers
        .map(gitscope_git::CommitHeader::identity)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// get_branch_list
// ============================================================================

/// Branches with their last commit dates
#[derive(Debug, Clone, Serialize)]
pub struct BranchListResponse {
    /// Repository
    pub repo: RepoRef,
    /// Branches in the order git listed them
    pub branches: Vec<BranchRecord>,
    /// Number of branches
    pub total_branches: usize,
}

/// Assemble the branch listing
#[must_use]
pub fn branch_list(repo: RepoRef, branches: Vec<BranchRecord>) -> BranchListResponse {
    BranchListResponse {
        repo,
        total_branches: branches.len(),
        branches,
    }
}

// ============================================================================
// get_commit_history
// ============================================================================

/// Earliest and latest commit dates in a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Date of the last (oldest) record
    pub earliest: Option<String>,
    /// Date of the first (newest) record
    pub latest: Option<String>,
}

/// Totals over the returned commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    /// Commits returned
    pub total_commits: usize,
    /// Sum of per-commit file counts
    pub total_files_changed: usize,
    /// Lines added
    pub total_additions: u64,
    /// Lines deleted
    pub total_deletions: u64,
    /// Sorted `Name <email>` identities
    pub authors: Vec<String>,
    /// Date span
    pub date_range: DateRange,
}

/// Commit history with its filters and summary
#[derive(Debug, Clone, Serialize)]
pub struct CommitHistoryResponse {
    /// Repository
    pub repo: RepoRef,
    /// Filters as requested
    pub filters: LogQuery,
    /// Commits, most recent first
    pub commits: Vec<CommitRecord>,
    /// Totals
    pub summary: HistorySummary,
}

/// Assemble the commit history
#[must_use]
pub fn commit_history(
    repo: RepoRef,
    filters: LogQuery,
    commits: Vec<CommitRecord>,
) -> CommitHistoryResponse {
    let summary = HistorySummary {
        total_commits: commits.len(),
        total_files_changed: commits.iter().map(|c| c.stats().total_files).sum(),
        total_additions: commits
            .iter()
            .fold(0, |acc, c| acc.saturating_add(c.stats().total_additions)),
        total_deletions: commits
            .iter()
            .fold(0, |acc, c| acc.saturating_add(c.stats().total_deletions)),
        authors: identities(commits.iter().map(CommitRecord::header)),
        date_range: DateRange {
            earliest: commits.last().map(|c| c.date().to_string()),
            latest: commits.first().map(|c| c.date().to_string()),
        },
    };

    CommitHistoryResponse {
        repo,
        filters,
        commits,
        summary,
    }
}

// ============================================================================
// get_developer_stats
// ============================================================================

/// Who the statistics are about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeveloperIdentity {
    /// Name or email pattern supplied by the caller
    pub identifier: String,
    /// Sorted identities git matched against the pattern
    pub matched_as: Vec<String>,
}

/// Dates of the oldest and newest matched commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActualRange {
    /// Oldest commit date
    pub first_commit: Option<String>,
    /// Newest commit date
    pub last_commit: Option<String>,
}

/// Requested filters plus the span actually covered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsTimeRange {
    /// Lower bound passed to git
    pub since: Option<String>,
    /// Upper bound passed to git
    pub until: Option<String>,
    /// Span of the matched commits
    pub actual_range: ActualRange,
}

/// One developer's statistics
#[derive(Debug, Clone, Serialize)]
pub struct DeveloperStatsResponse {
    /// Repository
    pub repo: RepoRef,
    /// Developer identity
    pub developer: DeveloperIdentity,
    /// Time range
    pub time_range: StatsTimeRange,
    /// Statistics
    pub stats: DeveloperStats,
}

/// Assemble a developer's statistics
#[must_use]
pub fn developer_stats(
    repo: RepoRef,
    identifier: &str,
    range: TimeRange,
    commits: &[CommitRecord],
    stats: DeveloperStats,
) -> DeveloperStatsResponse {
    DeveloperStatsResponse {
        repo,
        developer: DeveloperIdentity {
            identifier: identifier.to_string(),
            matched_as: identities(commits.iter().map(CommitRecord::header)),
        },
        time_range: StatsTimeRange {
            since: range.since,
            until: range.until,
            actual_range: ActualRange {
                first_commit: commits.last().map(|c| c.date().to_string()),
                last_commit: commits.first().map(|c| c.date().to_string()),
            },
        },
        stats,
    }
}

// ============================================================================
// compare_developer_stats
// ============================================================================

/// Several developers side by side
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    /// Repository
    pub repo: RepoRef,
    /// Date filters
    pub time_range: TimeRange,
    /// Per-developer statistics with activity scores, in roster order
    pub developers: Vec<ScoredDeveloper>,
    /// Rankings and totals
    pub comparison: ComparisonResult,
}

/// Assemble a comparison
#[must_use]
pub fn comparison(
    repo: RepoRef,
    time_range: TimeRange,
    entries: &[DeveloperEntry],
    comparison: ComparisonResult,
) -> ComparisonResponse {
    ComparisonResponse {
        repo,
        time_range,
        developers: entries.iter().map(DeveloperEntry::scored).collect(),
        comparison,
    }
}

// ============================================================================
// get_file_changes
// ============================================================================

/// The file a history describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    /// Path as requested
    pub path: String,
    /// Whether the path exists in the working tree now
    pub exists: bool,
}

/// Filters for a file history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTimeRange {
    /// Lower bound passed to git
    pub since: Option<String>,
    /// Upper bound passed to git
    pub until: Option<String>,
    /// Commit limit passed to git
    pub max_count: Option<usize>,
}

/// Totals over a file's history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileChangeSummary {
    /// Commits returned
    pub total_commits: usize,
    /// Lines added
    pub total_additions: u64,
    /// Lines deleted
    pub total_deletions: u64,
    /// Sorted `Name <email>` identities
    pub unique_authors: Vec<String>,
    /// Oldest change date
    pub first_change: Option<String>,
    /// Newest change date
    pub last_change: Option<String>,
}

/// History of a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileChangesResponse {
    /// Repository
    pub repo: RepoRef,
    /// File
    pub file: FileRef,
    /// Filters
    pub time_range: FileTimeRange,
    /// One record per commit, most recent first
    pub commits: Vec<FileHistoryRecord>,
    /// Totals
    pub summary: FileChangeSummary,
}

/// Assemble a file history
#[must_use]
pub fn file_changes(
    repo: RepoRef,
    file: FileRef,
    time_range: FileTimeRange,
    commits: Vec<FileHistoryRecord>,
) -> FileChangesResponse {
    let summary = FileChangeSummary {
        total_commits: commits.len(),
        total_additions: commits
            .iter()
            .fold(0, |acc, c| acc.saturating_add(c.changes.additions)),
        total_deletions: commits
            .iter()
            .fold(0, |acc, c| acc.saturating_add(c.changes.deletions)),
        unique_authors: identities(commits.iter().map(|c| &c.header)),
        first_change: commits.last().map(|c| c.header.date.clone()),
        last_change: commits.first().map(|c| c.header.date.clone()),
    };

    FileChangesResponse {
        repo,
        file,
        time_range,
        commits,
        summary,
    }
}

// ============================================================================
// sync_repository
// ============================================================================

/// Which sync was run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOperation {
    /// Update remote-tracking refs only
    Fetch,
    /// Fetch and merge into the current branch
    Pull,
}

impl SyncOperation {
    /// Parse the tool's `operation` argument
    #[must_use]
    pub fn parse(operation: &str) -> Option<Self> {
        match operation {
            "fetch" => Some(Self::Fetch),
            "pull" => Some(Self::Pull),
            _ => None,
        }
    }
}

/// Counts and a human-readable outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Always true; failures surface as errors instead
    pub success: bool,
    /// Number of remotes fetched
    pub remotes_synced: usize,
    /// Number of new or moved branches
    pub branches_updated: usize,
    /// Number of pruned branches
    pub branches_pruned: usize,
    /// Outcome message
    pub message: String,
}

/// Result of a fetch or pull
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    /// Repository
    pub repo: RepoRef,
    /// Operation run
    pub operation: SyncOperation,
    /// When the sync ran, supplied by the caller
    pub timestamp: String,
    /// Parsed transcript
    pub sync_result: FetchSummary,
    /// Branch tracking after the sync
    pub status_after: StatusRecord,
    /// Counts and message
    pub summary: SyncSummary,
}

/// Assemble a sync result
#[must_use]
pub fn sync(
    repo: RepoRef,
    operation: SyncOperation,
    timestamp: String,
    sync_result: FetchSummary,
    status_after: StatusRecord,
) -> SyncResponse {
    let summary = SyncSummary {
        success: true,
        remotes_synced: sync_result.remotes_synced.len(),
        branches_updated: sync_result.branches_updated.len(),
        branches_pruned: sync_result.branches_pruned.len(),
        message: sync_message(operation, &sync_result),
    };

    SyncResponse {
        repo,
        operation,
        timestamp,
        sync_result,
        status_after,
        summary,
    }
}

fn sync_message(operation: SyncOperation, result: &FetchSummary) -> String {
    match operation {
        SyncOperation::Fetch => {
            let mut message = format!(
                "Successfully fetched from {} remote(s)",
                result.remotes_synced.len()
            );
            if !result.branches_updated.is_empty() {
                message.push_str(&format!(
                    ", {} branch(es) updated",
                    result.branches_updated.len()
                ));
            }
            if !result.branches_pruned.is_empty() {
                message.push_str(&format!(
                    ", {} branch(es) pruned",
                    result.branches_pruned.len()
                ));
            }
            message
        }
        SyncOperation::Pull => {
            let raw = &result.raw_output;
            if raw.contains("Already up to date") || raw.contains("Already up-to-date") {
                "Already up to date with remote".to_string()
            } else {
                "Successfully pulled latest changes".to_string()
            }
        }
    }
}

// ============================================================================
// get_project_dashboard
// ============================================================================

/// Repository with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRepo {
    /// Path supplied by the caller
    pub path: String,
    /// Final path component of the work tree
    pub name: String,
}

/// Window the dashboard covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    /// Lower bound passed to git
    pub since: String,
    /// Upper bound passed to git, or `now`
    pub until: String,
    /// Commits in the window
    pub total_commits_analyzed: usize,
}

/// How a client might chart one part of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartHint {
    /// Chart kind
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Chart title
    pub title: &'static str,
    /// What the chart shows
    pub description: &'static str,
    /// Dotted path of the data inside the dashboard
    pub data_path: &'static str,
    /// Field for the value axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_field: Option<&'static str>,
    /// Field for the category axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_field: Option<&'static str>,
    /// Columns for tabular hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<&'static [&'static str]>,
}

/// Fixed chart suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationHints {
    /// Bar chart of top contributors
    pub developer_activity: ChartHint,
    /// Pie chart of file types
    pub file_types: ChartHint,
    /// Table of hotspots
    pub hotspots: ChartHint,
}

impl Default for VisualizationHints {
    fn default() -> Self {
        Self {
            developer_activity: ChartHint {
                kind: "horizontal_bar",
                title: "Top Contributors",
                description: "Show top 5 developers by commit count",
                data_path: "team_performance.top_contributors",
                x_field: Some("commits"),
                y_field: Some("developer"),
                columns: None,
            },
            file_types: ChartHint {
                kind: "pie_chart",
                title: "File Types Distribution",
                description: "Breakdown of file types in changed files",
                data_path: "code_health.file_types_distribution",
                x_field: None,
                y_field: None,
                columns: None,
            },
            hotspots: ChartHint {
                kind: "table",
                title: "Code Hotspots",
                description: "Files with high activity (potential issues)",
                data_path: "code_health.hotspots",
                x_field: None,
                y_field: None,
                columns: Some(&["rank", "path", "commits", "developers", "risk_level"]),
            },
        }
    }
}

/// The project dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    /// Repository
    pub repo: DashboardRepo,
    /// Window
    pub period: Period,
    /// Executive summary, team performance and code health
    #[serde(flatten)]
    pub analysis: DashboardResult,
    /// Chart suggestions
    pub visualization_hints: VisualizationHints,
}

/// Assemble the dashboard
#[must_use]
pub fn dashboard(
    repo: DashboardRepo,
    since: String,
    until: Option<String>,
    commits_analyzed: usize,
    analysis: DashboardResult,
) -> DashboardResponse {
    DashboardResponse {
        repo,
        period: Period {
            since,
            until: until.unwrap_or_else(|| OPEN_ENDED_UNTIL.to_string()),
            total_commits_analyzed: commits_analyzed,
        },
        analysis,
        visualization_hints: VisualizationHints::default(),
    }
}
