// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Project dashboard analytics
//!
//! Three independent folds over an unfiltered window of commits: an
//! executive summary, team performance with low-activity alerts, and code
//! health (hotspots, high-churn files and the file-type distribution).
//! Developers are keyed by author name.

use chrono::{DateTime, NaiveDateTime};
use gitscope_git::{CommitRecord, FileChange};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extension::extension_histogram;

/// A file touched by more commits than this is high risk
pub const RISK_HIGH_COMMITS: usize = 15;
/// A file touched by more commits than this is at least medium risk
pub const RISK_MEDIUM_COMMITS: usize = 8;
/// A file touched by more developers than this is high risk
pub const RISK_HIGH_DEVELOPERS: usize = 5;
/// A file touched by more developers than this is at least medium risk
pub const RISK_MEDIUM_DEVELOPERS: usize = 3;
/// Contributors below this share of commits may be flagged
pub const LOW_ACTIVITY_PERCENTAGE: f64 = 5.0;
/// Contributors below this many commits may be flagged
pub const LOW_ACTIVITY_COMMITS: usize = 3;
/// Files with more churn than this are reported as high churn
pub const HIGH_CHURN_THRESHOLD: u64 = 100;
/// Stability ratios above this are `stable`
pub const STABILITY_THRESHOLD: f64 = 0.3;

const TOP_CONTRIBUTORS: usize = 5;
const TOP_HOTSPOTS: usize = 10;
const TOP_HIGH_CHURN: usize = 5;
const TOP_FILE_TYPES: usize = 10;

/// Date format of git's `%ai` once the offset is dropped
const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SECONDS_PER_DAY: i64 = 86_400;

// ============================================================================
// Result types
// ============================================================================

/// Headline numbers for the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Commits in the window
    pub total_commits: usize,
    /// Distinct author names
    pub total_developers: usize,
    /// Distinct paths touched
    pub total_files_changed: usize,
    /// Lines added
    pub total_additions: u64,
    /// Lines deleted
    pub total_deletions: u64,
    /// Additions minus deletions
    pub net_lines: i64,
    /// Commits per calendar day between the first and last commit, one
    /// decimal place with halves rounded away from zero
    pub avg_commits_per_day: f64,
}

/// One developer's share of the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Author name
    pub developer: String,
    /// Commits authored
    pub commits: usize,
    /// Share of all commits, one decimal place
    ///
    /// Halves round away from zero, so 0.25 becomes 0.3 rather than 0.2.
    pub percentage: f64,
    /// Lines added
    pub additions: u64,
    /// Lines deleted
    pub deletions: u64,
    /// Distinct paths touched
    pub files_touched: usize,
    /// Additions plus deletions
    pub activity_score: u64,
    /// 1-based position by commit count
    pub rank: usize,
}

/// Kind of team alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Small share and few commits
    LowActivity,
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look, not an error
    Warning,
}

/// A notable condition in the team breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert kind
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Author name the alert is about
    pub developer: String,
    /// Human-readable description
    pub message: String,
    /// Severity
    pub severity: Severity,
}

impl Alert {
    fn low_activity(developer: &str, commits: usize) -> Self {
        Self {
            kind: AlertKind::LowActivity,
            developer: developer.to_string(),
            message: format!("Only {commits} commits - low activity"),
            severity: Severity::Warning,
        }
    }
}

/// Contributor breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformance {
    /// Top five contributors by commit count
    pub top_contributors: Vec<Contributor>,
    /// Distinct author names
    pub developer_count: usize,
    /// Authors with at least one commit in the window
    pub active_developers: usize,
    /// Low-activity alerts over every contributor, in rank order
    pub alerts: Vec<Alert>,
}

/// Risk bucket for a hotspot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Many commits or many developers
    High,
    /// Moderate commits or developers
    Medium,
    /// Neither
    Low,
}

impl RiskLevel {
    /// Bucket a file by commit count and distinct developers
    ///
    /// # Example
    ///
    /// ```
    /// use gitscope_stats::dashboard::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::classify(16, 2), RiskLevel::High);
    /// assert_eq!(RiskLevel::classify(10, 1), RiskLevel::Medium);
    /// assert_eq!(RiskLevel::classify(8, 3), RiskLevel::Low);
    /// ```
    #[must_use]
    pub fn classify(commits: usize, developers: usize) -> Self {
        if commits > RISK_HIGH_COMMITS || developers > RISK_HIGH_DEVELOPERS {
            Self::High
        } else if commits > RISK_MEDIUM_COMMITS || developers > RISK_MEDIUM_DEVELOPERS {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A frequently changed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Repository-relative path
    pub path: String,
    /// Commits that touched it
    pub commits: usize,
    /// Distinct authors who touched it
    pub developers: usize,
    /// Lines added
    pub additions: u64,
    /// Lines deleted
    pub deletions: u64,
    /// Additions plus deletions
    pub churn: u64,
    /// Risk bucket
    pub risk_level: RiskLevel,
    /// 1-based position by commit count
    pub rank: usize,
}

/// Whether heavy churn moved the file somewhere or rewrote it in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// Net change is a large share of churn
    Stable,
    /// Mostly rewritten in place
    Unstable,
}

impl Stability {
    /// Classify by `|additions - deletions| / churn`
    #[must_use]
    pub fn classify(additions: u64, deletions: u64) -> Self {
        let churn = additions.saturating_add(deletions);
        if churn == 0 {
            return Self::Unstable;
        }
        let ratio = additions.abs_diff(deletions) as f64 / churn as f64;
        if ratio > STABILITY_THRESHOLD {
            Self::Stable
        } else {
            Self::Unstable
        }
    }
}

/// A file whose churn exceeds [`HIGH_CHURN_THRESHOLD`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnFile {
    /// Repository-relative path
    pub path: String,
    /// Lines added
    pub additions: u64,
    /// Lines deleted
    pub deletions: u64,
    /// Additions plus deletions
    pub churn: u64,
    /// Additions minus deletions (signed)
    pub net_change: i64,
    /// Stability class
    pub stability: Stability,
}

/// Count and share of one extension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileTypeShare {
    /// Distinct paths with this extension
    pub count: usize,
    /// Share of all distinct paths, one decimal place, halves away from zero
    pub percentage: f64,
}

/// File-level risk indicators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeHealth {
    /// Top ten files by commit count
    pub hotspots: Vec<Hotspot>,
    /// Top five files by churn above the threshold
    pub high_churn_files: Vec<ChurnFile>,
    /// Top ten extensions over distinct paths
    pub file_types_distribution: IndexMap<String, FileTypeShare>,
}

/// All three dashboard analyses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResult {
    /// Headline numbers
    pub executive_summary: ExecutiveSummary,
    /// Contributor breakdown
    pub team_performance: TeamPerformance,
    /// File-level risk
    pub code_health: CodeHealth,
}

// ============================================================================
// Analyses
// ============================================================================

/// Run every dashboard analysis over `commits` (most recent first)
#[must_use]
pub fn analyze_dashboard(commits: &[CommitRecord]) -> DashboardResult {
    DashboardResult {
        executive_summary: executive_summary(commits),
        team_performance: team_performance(commits),
        code_health: code_health(commits),
    }
}

/// Headline totals and average commits per day
///
/// The day span runs from the last record's date to the first record's. If
/// either date cannot be parsed the average is 0.
#[must_use]
pub fn executive_summary(commits: &[CommitRecord]) -> ExecutiveSummary {
    let (Some(latest), Some(earliest)) = (commits.first(), commits.last()) else {
        return ExecutiveSummary::default();
    };

    let developers: IndexSet<&str> = commits.iter().map(CommitRecord::author_name).collect();
    let files: IndexSet<&str> = commits
        .iter()
        .flat_map(CommitRecord::files)
        .map(|f| f.path.as_str())
        .collect();
    let total_additions = commits
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.stats().total_additions));
    let total_deletions = commits
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.stats().total_deletions));

    let span = (
        parse_commit_date(latest.date()),
        parse_commit_date(earliest.date()),
    );
    let avg_commits_per_day = match span {
        (Some(last), Some(first)) => {
            let elapsed_days = (last - first).num_seconds().div_euclid(SECONDS_PER_DAY);
            let days = (elapsed_days + 1).max(1);
            round1(commits.len() as f64 / days as f64)
        }
        _ => {
            warn!(
                latest = latest.date(),
                earliest = earliest.date(),
                "Could not parse commit dates; reporting 0 commits per day"
            );
            0.0
        }
    };

    ExecutiveSummary {
        total_commits: commits.len(),
        total_developers: developers.len(),
        total_files_changed: files.len(),
        total_additions,
        total_deletions,
        net_lines: net_change(total_additions, total_deletions),
        avg_commits_per_day,
    }
}

#[derive(Default)]
struct DeveloperTally<'a> {
    commits: usize,
    additions: u64,
    deletions: u64,
    files: IndexSet<&'a str>,
}

impl DeveloperTally<'_> {
    fn add_lines(&mut self, change: &FileChange) {
        self.additions = self.additions.saturating_add(change.additions);
        self.deletions = self.deletions.saturating_add(change.deletions);
    }
}

/// Rank contributors by commit count and flag low activity
#[must_use]
pub fn team_performance(commits: &[CommitRecord]) -> TeamPerformance {
    if commits.is_empty() {
        return TeamPerformance::default();
    }

    let mut tallies: IndexMap<&str, DeveloperTally<'_>> = IndexMap::new();
    for commit in commits {
        let tally = tallies.entry(commit.author_name()).or_default();
        tally.commits += 1;
        for change in commit.files() {
            tally.add_lines(change);
            tally.files.insert(change.path.as_str());
        }
    }

    let total_commits = commits.len() as f64;
    let mut contributors: Vec<Contributor> = tallies
        .iter()
        .map(|(developer, tally)| Contributor {
            developer: (*developer).to_string(),
            commits: tally.commits,
            percentage: round1(tally.commits as f64 / total_commits * 100.0),
            additions: tally.additions,
            deletions: tally.deletions,
            files_touched: tally.files.len(),
            activity_score: tally.additions.saturating_add(tally.deletions),
            rank: 0,
        })
        .collect();

    contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
    for (i, contributor) in contributors.iter_mut().enumerate() {
        contributor.rank = i + 1;
    }

    let alerts = contributors
        .iter()
        .filter(|c| c.percentage < LOW_ACTIVITY_PERCENTAGE && c.commits < LOW_ACTIVITY_COMMITS)
        .map(|c| Alert::low_activity(&c.developer, c.commits))
        .collect();

    contributors.truncate(TOP_CONTRIBUTORS);

    TeamPerformance {
        top_contributors: contributors,
        developer_count: tallies.len(),
        active_developers: tallies.len(),
        alerts,
    }
}

#[derive(Default)]
struct FileTally<'a> {
    commits: usize,
    developers: IndexSet<&'a str>,
    additions: u64,
    deletions: u64,
}

impl FileTally<'_> {
    fn add_lines(&mut self, change: &FileChange) {
        self.additions = self.additions.saturating_add(change.additions);
        self.deletions = self.deletions.saturating_add(change.deletions);
    }
}

/// Hotspots, high-churn files and extension distribution
#[must_use]
pub fn code_health(commits: &[CommitRecord]) -> CodeHealth {
    if commits.is_empty() {
        return CodeHealth::default();
    }

    let mut tallies: IndexMap<&str, FileTally<'_>> = IndexMap::new();
    for commit in commits {
        for change in commit.files() {
            let tally = tallies.entry(change.path.as_str()).or_default();
            tally.commits += 1;
            tally.developers.insert(commit.author_name());
            tally.add_lines(change);
        }
    }

    let mut hotspots: Vec<Hotspot> = tallies
        .iter()
        .map(|(path, tally)| Hotspot {
            path: (*path).to_string(),
            commits: tally.commits,
            developers: tally.developers.len(),
            additions: tally.additions,
            deletions: tally.deletions,
            churn: tally.additions.saturating_add(tally.deletions),
            risk_level: RiskLevel::classify(tally.commits, tally.developers.len()),
            rank: 0,
        })
        .collect();
    hotspots.sort_by(|a, b| b.commits.cmp(&a.commits));
    hotspots.truncate(TOP_HOTSPOTS);
    for (i, hotspot) in hotspots.iter_mut().enumerate() {
        hotspot.rank = i + 1;
    }

    let mut high_churn_files: Vec<ChurnFile> = tallies
        .iter()
        .filter(|(_, t)| t.additions.saturating_add(t.deletions) > HIGH_CHURN_THRESHOLD)
        .map(|(path, t)| ChurnFile {
            path: (*path).to_string(),
            additions: t.additions,
            deletions: t.deletions,
            churn: t.additions.saturating_add(t.deletions),
            net_change: net_change(t.additions, t.deletions),
            stability: Stability::classify(t.additions, t.deletions),
        })
        .collect();
    high_churn_files.sort_by(|a, b| b.churn.cmp(&a.churn));
    high_churn_files.truncate(TOP_HIGH_CHURN);

    let total_files = tallies.len() as f64;
    let file_types_distribution = extension_histogram(tallies.keys().copied(), TOP_FILE_TYPES)
        .into_iter()
        .map(|(ext, count)| {
            let share = FileTypeShare {
                count,
                percentage: round1(count as f64 / total_files * 100.0),
            };
            (ext, share)
        })
        .collect();

    CodeHealth {
        hotspots,
        high_churn_files,
        file_types_distribution,
    }
}

/// Parse a commit date for day arithmetic
///
/// Accepts git's `%ai` form (the offset is dropped and wall-clock time
/// compared) and RFC 3339.
#[must_use]
pub fn parse_commit_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    let wall_clock = date.rsplit_once(' ').map_or(date, |(head, _)| head);
    NaiveDateTime::parse_from_str(wall_clock, GIT_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

fn net_change(additions: u64, deletions: u64) -> i64 {
    let diff = i64::try_from(additions.abs_diff(deletions)).unwrap_or(i64::MAX);
    if additions >= deletions { diff } else { -diff }
}

/// One decimal place, halves away from zero (`f64::round`)
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
