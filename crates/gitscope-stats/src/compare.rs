// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Cross-developer rankings and totals

use serde::{Deserialize, Serialize};

use crate::developer::DeveloperStats;

/// One developer's statistics, labelled with the identifier used to fetch them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperEntry {
    /// Author name or email as supplied by the caller
    pub developer: String,
    /// Statistics over that author's commits
    pub stats: DeveloperStats,
}

impl DeveloperEntry {
    /// Pair an identifier with its statistics
    #[must_use]
    pub fn new(developer: impl Into<String>, stats: DeveloperStats) -> Self {
        Self {
            developer: developer.into(),
            stats,
        }
    }

    /// The entry with its activity score attached, as reported to callers
    #[must_use]
    pub fn scored(&self) -> ScoredDeveloper {
        ScoredDeveloper {
            developer: self.developer.clone(),
            stats: ScoredStats {
                activity_score: self.stats.activity_score(),
                stats: self.stats.clone(),
            },
        }
    }
}

/// [`DeveloperStats`] plus `activity_score`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredStats {
    #[serde(flatten)]
    stats: DeveloperStats,
    /// Additions plus deletions
    pub activity_score: u64,
}

impl ScoredStats {
    /// The underlying statistics
    #[must_use]
    pub fn stats(&self) -> &DeveloperStats {
        &self.stats
    }
}

/// A developer with their activity score, as listed in comparison output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredDeveloper {
    /// Author identifier
    pub developer: String,
    /// Statistics with activity score
    pub stats: ScoredStats,
}

/// Winner of one ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// Author identifier
    pub developer: String,
    /// The winning value
    pub value: u64,
}

/// Leaders per metric; all `None` when nobody was compared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    /// Most commits
    pub most_commits: Option<Ranking>,
    /// Most file changes
    pub most_files_changed: Option<Ranking>,
    /// Most lines added
    pub most_additions: Option<Ranking>,
    /// Most lines deleted
    pub most_deletions: Option<Ranking>,
    /// Highest activity score
    pub most_active: Option<Ranking>,
}

/// Sums across every compared developer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTotals {
    /// Commits
    pub total_commits: u64,
    /// File changes
    pub total_files_changed: u64,
    /// Lines added
    pub total_additions: u64,
    /// Lines deleted
    pub total_deletions: u64,
}

/// Rankings and totals for a set of developers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Leaders per metric
    pub rankings: Rankings,
    /// Sums across developers
    pub totals: ComparisonTotals,
}

/// Rank developers against each other
///
/// Each ranking picks the largest value; on a tie the developer listed
/// first wins. An empty slice gives `None` rankings and zero totals.
///
/// # Example
///
/// ```
/// use gitscope_stats::compare::{DeveloperEntry, compare_developers};
/// use gitscope_stats::developer::DeveloperStats;
///
/// let erik = DeveloperStats { total_commits: 45, total_additions: 2500, ..Default::default() };
/// let jane = DeveloperStats { total_commits: 38, total_additions: 2100, ..Default::default() };
/// let result = compare_developers(&[DeveloperEntry::new("Erik", erik), DeveloperEntry::new("Jane", jane)]);
///
/// let leader = result.rankings.most_commits.unwrap();
/// assert_eq!((leader.developer.as_str(), leader.value), ("Erik", 45));
/// assert_eq!(result.totals.total_commits, 83);
/// ```
#[must_use]
pub fn compare_developers(entries: &[DeveloperEntry]) -> ComparisonResult {
    let rankings = Rankings {
        most_commits: leader(entries, |s| s.total_commits as u64),
        most_files_changed: leader(entries, |s| s.total_files_changed as u64),
        most_additions: leader(entries, |s| s.total_additions),
        most_deletions: leader(entries, |s| s.total_deletions),
        most_active: leader(entries, DeveloperStats::activity_score),
    };

    let totals = entries
        .iter()
        .fold(ComparisonTotals::default(), |mut acc, e| {
            acc.total_commits += e.stats.total_commits as u64;
            acc.total_files_changed += e.stats.total_files_changed as u64;
            acc.total_additions = acc.total_additions.saturating_add(e.stats.total_additions);
            acc.total_deletions = acc.total_deletions.saturating_add(e.stats.total_deletions);
            acc
        });

    ComparisonResult { rankings, totals }
}

/// First entry holding the maximum of `metric`
///
/// `Iterator::max_by_key` returns the last maximum, so ties would go to the
/// wrong developer.
fn leader<F>(entries: &[DeveloperEntry], metric: F) -> Option<Ranking>
where
    F: Fn(&DeveloperStats) -> u64,
{
    entries
        .iter()
        .fold(None, |best: Option<(&DeveloperEntry, u64)>, entry| {
            let value = metric(&entry.stats);
            match best {
                Some((_, top)) if top >= value => best,
                _ => Some((entry, value)),
            }
        })
        .map(|(entry, value)| Ranking {
            developer: entry.developer.clone(),
            value,
        })
}
