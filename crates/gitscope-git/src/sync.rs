// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fetch transcript and branch-tracking status parsers
//!
//! The fetch transcript is free-form human-readable text, so its parser is a
//! set of substring heuristics. They are tied to the wording of current git
//! releases and will misclassify lines if that wording changes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Fetch transcript
// ============================================================================

/// How a remote-tracking ref changed during a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    /// The branch appeared on the remote
    New,
    /// The branch tip moved
    Updated,
}

/// A remote-tracking branch that was created or moved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchUpdate {
    /// Remote name (`origin`)
    pub remote: String,
    /// Branch name on that remote
    pub branch: String,
    /// What happened to it
    pub action: UpdateAction,
}

/// Everything recognised in a fetch (or pull) transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSummary {
    /// Remotes named on `Fetching <remote>` lines, sorted and deduplicated
    pub remotes_synced: Vec<String>,
    /// New and updated branches in transcript order
    pub branches_updated: Vec<BranchUpdate>,
    /// Branch names removed by `--prune`, in transcript order
    pub branches_pruned: Vec<String>,
    /// The transcript exactly as received
    pub raw_output: String,
}

/// Classification of a `... -> remote/branch` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefLine {
    New,
    Pruned,
    Updated,
}

struct RefRule {
    matches: fn(&str) -> bool,
    kind: RefLine,
}

/// Evaluated top to bottom; the first match wins
const REF_RULES: &[RefRule] = &[
    RefRule {
        matches: |line| line.contains("[new branch]"),
        kind: RefLine::New,
    },
    RefRule {
        matches: |line| line.contains("[deleted]") || line.contains("x "),
        kind: RefLine::Pruned,
    },
    RefRule {
        matches: |_| true,
        kind: RefLine::Updated,
    },
];

const FETCHING_MARKER: &str = "Fetching";
const REF_ARROW: &str = "->";

/// Parse the transcript of `git fetch --all --prune --verbose`
///
/// Empty input yields empty collections.
#[must_use]
pub fn parse_fetch_output(raw: &str) -> FetchSummary {
    let mut remotes = BTreeSet::new();
    let mut summary = FetchSummary {
        raw_output: raw.to_string(),
        ..Default::default()
    };

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains(FETCHING_MARKER) {
            if let Some(remote) = line.split_whitespace().nth(1) {
                remotes.insert(remote.to_string());
            }
        }

        if !line.contains(REF_ARROW) {
            continue;
        }

        let Some((remote, branch)) = ref_target(line) else {
            debug!(line, "Ignoring ref line without remote/branch target");
            continue;
        };

        match classify(line) {
            RefLine::New => summary.branches_updated.push(BranchUpdate {
                remote,
                branch,
                action: UpdateAction::New,
            }),
            RefLine::Updated => summary.branches_updated.push(BranchUpdate {
                remote,
                branch,
                action: UpdateAction::Updated,
            }),
            RefLine::Pruned => summary.branches_pruned.push(branch),
        }
    }

    summary.remotes_synced = remotes.into_iter().collect();
    summary
}

fn classify(line: &str) -> RefLine {
    REF_RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map_or(RefLine::Updated, |rule| rule.kind)
}

/// Split the right-hand side of `->` once on `/`
fn ref_target(line: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = line.split(REF_ARROW).collect();
    let [_, target] = parts.as_slice() else {
        return None;
    };
    let (remote, branch) = target.trim().split_once('/')?;
    Some((remote.to_string(), branch.to_string()))
}

// ============================================================================
// Branch-tracking status
// ============================================================================

/// Relationship between the local branch and its upstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
    /// Neither ahead nor behind
    UpToDate,
    /// Local has commits the upstream lacks
    Ahead,
    /// Upstream has commits the local branch lacks
    Behind,
    /// Both sides have unique commits
    Diverged,
    /// No status line could be read
    #[default]
    Unknown,
}

impl SyncStatus {
    /// Decide the status from ahead/behind counts
    #[must_use]
    pub fn from_counts(ahead: u32, behind: u32) -> Self {
        match (ahead > 0, behind > 0) {
            (true, true) => Self::Diverged,
            (true, false) => Self::Ahead,
            (false, true) => Self::Behind,
            (false, false) => Self::UpToDate,
        }
    }
}

/// Parsed first line of `git status --branch --short`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Checked-out branch
    pub current_branch: Option<String>,
    /// Upstream ref, e.g. `origin/main`
    pub tracking: Option<String>,
    /// Commits the local branch leads by
    pub ahead: u32,
    /// Commits the local branch trails by
    pub behind: u32,
    /// Summary of ahead/behind
    pub sync_status: SyncStatus,
}

/// Parse the `## branch...remote/branch [ahead N, behind M]` header
///
/// Input that is empty or does not start with `##` yields an all-empty
/// record with [`SyncStatus::Unknown`].
///
/// # Example
///
/// ```
/// use gitscope_git::sync::{parse_status_output, SyncStatus};
///
/// let status = parse_status_output("## main...origin/main [ahead 2, behind 1]\n M src/lib.rs\n");
/// assert_eq!(status.current_branch.as_deref(), Some("main"));
/// assert_eq!(status.tracking.as_deref(), Some("origin/main"));
/// assert_eq!((status.ahead, status.behind), (2, 1));
/// assert_eq!(status.sync_status, SyncStatus::Diverged);
/// ```
#[must_use]
pub fn parse_status_output(raw: &str) -> StatusRecord {
    let Some(info) = raw
        .lines()
        .next()
        .map(str::trim)
        .and_then(|line| line.strip_prefix("##"))
        .map(str::trim)
    else {
        return StatusRecord::default();
    };

    let mut record = StatusRecord::default();

    match info.split_once("...") {
        Some((local, rest)) => {
            record.current_branch = non_empty(local);
            match rest.split_once('[') {
                Some((tracking, bracket)) => {
                    record.tracking = non_empty(tracking);
                    let counts = bracket.split(']').next().unwrap_or_default();
                    record.ahead = bracket_count(counts, "ahead");
                    record.behind = bracket_count(counts, "behind");
                }
                None => record.tracking = non_empty(rest),
            }
        }
        None => {
            record.current_branch = info.split_whitespace().next().map(str::to_string);
        }
    }

    record.sync_status = SyncStatus::from_counts(record.ahead, record.behind);
    record
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Read the integer after `label` inside `ahead N, behind M`
fn bracket_count(counts: &str, label: &str) -> u32 {
    counts
        .split_once(label)
        .map(|(_, after)| after.trim().split(',').next().unwrap_or_default().trim())
        .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const SAMPLE_FETCH: &str = "\
Fetching origin
remote: Counting objects: 100, done.
remote: Compressing objects: 100% (50/50), done.
   abc123..def456    main       -> origin/main
 * [new branch]      feature-x  -> origin/feature-x
   ghi789..jkl012    dev        -> origin/dev
 - [deleted]         (none)     -> origin/old-topic
";

    #[test]
    fn test_parse_fetch_empty() {
        let summary = parse_fetch_output("");
        assert!(summary.remotes_synced.is_empty());
        assert!(summary.branches_updated.is_empty());
        assert!(summary.branches_pruned.is_empty());
        assert_eq!(summary.raw_output, "");
    }

    #[test]
    fn test_parse_fetch_sample() {
        let summary = parse_fetch_output(SAMPLE_FETCH);
        assert_eq!(summary.remotes_synced, vec!["origin".to_string()]);
        assert_eq!(
            summary.branches_updated,
            vec![
                BranchUpdate {
                    remote: "origin".to_string(),
                    branch: "main".to_string(),
                    action: UpdateAction::Updated,
                },
                BranchUpdate {
                    remote: "origin".to_string(),
                    branch: "feature-x".to_string(),
                    action: UpdateAction::New,
                },
                BranchUpdate {
                    remote: "origin".to_string(),
                    branch: "dev".to_string(),
                    action: UpdateAction::Updated,
                },
            ]
        );
        assert_eq!(summary.branches_pruned, vec!["old-topic".to_string()]);
        assert_eq!(summary.raw_output, SAMPLE_FETCH);
    }

    #[test]
    fn test_new_branch_only() {
        let raw = "Fetching origin\n * [new branch]      feature-x  -> origin/feature-x\n";
        let summary = parse_fetch_output(raw);
        assert_eq!(summary.remotes_synced, vec!["origin".to_string()]);
        assert_eq!(summary.branches_updated.len(), 1);
        assert_eq!(summary.branches_updated[0].action, UpdateAction::New);
        assert_eq!(summary.branches_updated[0].remote, "origin");
        assert_eq!(summary.branches_updated[0].branch, "feature-x");
    }

    #[test]
    fn test_remotes_sorted_and_deduplicated() {
        let raw = "Fetching upstream\nFetching origin\nFetching upstream\n";
        let summary = parse_fetch_output(raw);
        assert_eq!(
            summary.remotes_synced,
            vec!["origin".to_string(), "upstream".to_string()]
        );
    }

    #[test]
    fn test_prune_marker_x() {
        let raw = " x [deleted]         (none)     -> origin/gone\n";
        let summary = parse_fetch_output(raw);
        assert_eq!(summary.branches_pruned, vec!["gone".to_string()]);
        assert!(summary.branches_updated.is_empty());
    }

    #[test]
    fn test_target_without_slash_dropped() {
        let raw = "   abc..def    main       -> FETCH_HEAD\n";
        let summary = parse_fetch_output(raw);
        assert!(summary.branches_updated.is_empty());
        assert!(summary.branches_pruned.is_empty());
    }

    #[test]
    fn test_branch_with_nested_slash() {
        let raw = " * [new branch]      user/topic  -> origin/user/topic\n";
        let summary = parse_fetch_output(raw);
        assert_eq!(summary.branches_updated[0].remote, "origin");
        assert_eq!(summary.branches_updated[0].branch, "user/topic");
    }

    #[test]
    fn test_status_up_to_date() {
        let status = parse_status_output("## main...origin/main");
        assert_eq!(status.current_branch.as_deref(), Some("main"));
        assert_eq!(status.tracking.as_deref(), Some("origin/main"));
        assert_eq!(status.ahead, 0);
        assert_eq!(status.behind, 0);
        assert_eq!(status.sync_status, SyncStatus::UpToDate);
    }

    #[test]
    fn test_status_behind() {
        let status = parse_status_output("## main...origin/main [behind 5]");
        assert_eq!(status.current_branch.as_deref(), Some("main"));
        assert_eq!(status.tracking.as_deref(), Some("origin/main"));
        assert_eq!(status.behind, 5);
        assert_eq!(status.sync_status, SyncStatus::Behind);
    }

    #[test]
    fn test_status_ahead() {
        let status = parse_status_output("## main...origin/main [ahead 3]");
        assert_eq!(status.ahead, 3);
        assert_eq!(status.behind, 0);
        assert_eq!(status.sync_status, SyncStatus::Ahead);
    }

    #[test]
    fn test_status_diverged() {
        let status = parse_status_output("## main...origin/main [ahead 2, behind 1]");
        assert_eq!(status.ahead, 2);
        assert_eq!(status.behind, 1);
        assert_eq!(status.sync_status, SyncStatus::Diverged);
    }

    #[test]
    fn test_status_without_upstream() {
        let status = parse_status_output("## feature\n?? new.txt\n");
        assert_eq!(status.current_branch.as_deref(), Some("feature"));
        assert!(status.tracking.is_none());
        assert_eq!(status.sync_status, SyncStatus::UpToDate);
    }

    #[test]
    fn test_status_unknown_inputs() {
        for raw in ["", " M src/lib.rs", "\n## main"] {
            let status = parse_status_output(raw);
            assert_eq!(status, StatusRecord::default(), "input: {raw:?}");
            assert_eq!(status.sync_status, SyncStatus::Unknown);
        }
    }

    #[test]
    fn test_status_bare_marker_does_not_panic() {
        let status = parse_status_output("##");
        assert!(status.current_branch.is_none());
        assert_eq!(status.sync_status, SyncStatus::UpToDate);
    }

    #[test]
    fn test_sync_status_serialization() {
        let json = serde_json::to_string(&SyncStatus::UpToDate).expect("serialize");
        assert_eq!(json, "\"up-to-date\"");
        let json = serde_json::to_string(&UpdateAction::New).expect("serialize");
        assert_eq!(json, "\"new\"");
    }
}
