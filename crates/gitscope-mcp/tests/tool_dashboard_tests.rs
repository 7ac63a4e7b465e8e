// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for the get_project_dashboard MCP tool handler


use fixtures::{TEAM_SINCE, lopsided_repo, team_repo};
use gitscope_stats::RiskLevel;
use gitscope_stats::dashboard::{AlertKind, Severity};
use mcp_harness::{McpTestHarness, assert_invalid_input_error};
use serde_json::json;
use similar_asserts::assert_eq;
use test_utils::git_available;

// ============================================================================
// Executive Summary
// ============================================================================

#[tokio::test]
async fn test_dashboard_executive_summary() {
    if !git_available() {
        return;
    }
    let repo = team_repo("dash-summary");
    let response = McpTestHarness::new()
        .dashboard(repo.path(), Some(TEAM_SINCE), None)
        .await
        .expect("dashboard should succeed");

    let summary = &response.analysis.executive_summary;
    assert_eq!(summary.total_commits, 5);
    assert_eq!(summary.total_developers, 3);
    assert_eq!(summary.total_files_changed, 4);
    assert_eq!(summary.total_additions, 24);
    assert_eq!(summary.total_deletions, 0);
    assert_eq!(summary.net_lines, 24);
    // 5 commits over the 6 calendar days from 2024-03-01 to 2024-03-06
    assert_eq!(summary.avg_commits_per_day, 0.8);

    assert_eq!(response.period.since.as_str(), TEAM_SINCE);
    assert_eq!(response.period.until.as_str(), "now");
    assert_eq!(response.period.total_commits_analyzed, 5);
    assert!(response.repo.name.starts_with("gitscope-test-"));
    assert_eq!(response.repo.path, repo.path_str());
}

#[tokio::test]
async fn test_dashboard_until_bound() {
    if !git_available() {
        return;
    }
    let repo = team_repo("dash-until");
    let response = McpTestHarness::new()
        .dashboard(repo.path(), Some(TEAM_SINCE), Some("2024-03-04"))
        .await
        .expect("dashboard should succeed");

    assert_eq!(response.period.until.as_str(), "2024-03-04");
    assert_eq!(response.analysis.executive_summary.total_commits, 3);
    assert_eq!(response.analysis.executive_summary.avg_commits_per_day, 1.0);
}

#[tokio::test]
async fn test_dashboard_default_window_is_recent() {
    if !git_available() {
        return;
    }
    // Fixture history is from 2024, well outside the last 30 days
    let repo = team_repo("dash-default");
    let response = McpTestHarness::new()
        .dashboard(repo.path(), None, None)
        .await
        .expect("dashboard should succeed");

    assert_eq!(response.period.since.as_str(), "30 days ago");
    assert_eq!(response.period.total_commits_analyzed, 0);

    let analysis = &response.analysis;
    assert_eq!(analysis.executive_summary.total_commits, 0);
    assert_eq!(analysis.executive_summary.avg_commits_per_day, 0.0);
    assert!(analysis.team_performance.top_contributors.is_empty());
    assert!(analysis.team_performance.alerts.is_empty());
    assert!(analysis.code_health.hotspots.is_empty());
    assert!(analysis.code_health.file_types_distribution.is_empty());
}

// ============================================================================
// Team Performance
// ============================================================================

#[tokio::test]
async fn test_dashboard_team_performance() {
    if !git_available() {
        return;
    }
    let repo = team_repo("dash-team");
    let response = McpTestHarness::new()
        .dashboard(repo.path(), Some(TEAM_SINCE), None)
        .await
        .expect("dashboard should succeed");

    let team = &response.analysis.team_performance;
    assert_eq!(team.developer_count, 3);
    assert_eq!(team.active_developers, 3);

    // Carol and Bob tie on one commit; Carol committed more recently
    let ranking: Vec<(&str, usize, f64, usize)> = team
        .top_contributors
        .iter()
        .map(|c| (c.developer.as_str(), c.commits, c.percentage, c.rank))
        .collect();
    assert_eq!(
        ranking,
        vec![
            ("Alice", 3, 60.0, 1),
            ("Carol", 1, 20.0, 2),
            ("Bob", 1, 20.0, 3),
        ]
    );

    let alice = &team.top_contributors[0];
    assert_eq!(alice.additions, 16);
    assert_eq!(alice.files_touched, 2);
    assert_eq!(alice.activity_score, 16);
    assert!(team.alerts.is_empty());
}

#[tokio::test]
async fn test_dashboard_low_activity_alert() {
    if !git_available() {
        return;
    }
    let repo = lopsided_repo("dash-alert");
    let response = McpTestHarness::new()
        .dashboard(repo.path(), Some("2023-12-01"), None)
        .await
        .expect("dashboard should succeed");

    let analysis = &response.analysis;
    assert_eq!(analysis.executive_summary.total_commits, 21);
    assert_eq!(analysis.executive_summary.avg_commits_per_day, 1.0);

    let team = &analysis.team_performance;
    assert_eq!(team.top_contributors[1].developer.as_str(), "Bob");
    assert_eq!(team.top_contributors[1].percentage, 4.8);

    assert_eq!(team.alerts.len(), 1);
    let alert = &team.alerts[0];
    assert_eq!(alert.kind, AlertKind::LowActivity);
    assert_eq!(alert.developer.as_str(), "Bob");
    assert_eq!(alert.message.as_str(), "Only 1 commits - low activity");
    assert_eq!(alert.severity, Severity::Warning);

    // Twenty-one single-commit files, capped at ten hotspots
    assert_eq!(analysis.code_health.hotspots.len(), 10);
}

// ============================================================================
// Code Health
// ============================================================================

#[tokio::test]
async fn test_dashboard_code_health() {
    if !git_available() {
        return;
    }
    let repo = team_repo("dash-health");
    let response = McpTestHarness::new()
        .dashboard(repo.path(), Some(TEAM_SINCE), None)
        .await
        .expect("dashboard should succeed");

    let health = &response.analysis.code_health;
    assert_eq!(health.hotspots.len(), 4);

    let top = &health.hotspots[0];
    assert_eq!(top.path.as_str(), "src/main.rs");
    assert_eq!(top.commits, 2);
    assert_eq!(top.developers, 1);
    assert_eq!(top.additions, 12);
    assert_eq!(top.churn, 12);
    assert_eq!(top.risk_level, RiskLevel::Low);
    assert_eq!(top.rank, 1);

    let ranks: Vec<usize> = health.hotspots.iter().map(|h| h.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);

    assert!(health.high_churn_files.is_empty());

    let distribution: Vec<(&str, usize, f64)> = health
        .file_types_distribution
        .iter()
        .map(|(ext, share)| (ext.as_str(), share.count, share.percentage))
        .collect();
    assert_eq!(distribution, vec![(".md", 2, 50.0), (".rs", 2, 50.0)]);
}

#[tokio::test]
async fn test_dashboard_high_churn_file() {
    if !git_available() {
        return;
    }
    let repo = team_repo("dash-churn");
    repo.commit_file_as(
        test_utils::BOB,
        "src/main.rs",
        &test_utils::numbered_lines(100, 150),
        "refactor: rewrite main",
        "2024-03-07T10:00:00+0000",
    );

    let response = McpTestHarness::new()
        .dashboard(repo.path(), Some(TEAM_SINCE), None)
        .await
        .expect("dashboard should succeed");

    let health = &response.analysis.code_health;
    assert_eq!(health.high_churn_files.len(), 1);
    let churn = &health.high_churn_files[0];
    assert_eq!(churn.path.as_str(), "src/main.rs");
    // 12 + 150 added, 12 deleted by the rewrite
    assert_eq!(churn.additions, 162);
    assert_eq!(churn.deletions, 12);
    assert_eq!(churn.churn, 174);
    assert_eq!(churn.net_change, 150);

    let top = &health.hotspots[0];
    assert_eq!(top.path.as_str(), "src/main.rs");
    assert_eq!(top.commits, 3);
    assert_eq!(top.developers, 2);
}

// ============================================================================
// JSON Shape
// ============================================================================

#[tokio::test]
async fn test_dashboard_json_shape() {
    if !git_available() {
        return;
    }
    let repo = team_repo("dash-json");
    let value = McpTestHarness::new()
        .invoke_with_json(
            "get_project_dashboard",
            json!({ "repo_path": repo.path_str(), "since": TEAM_SINCE }),
        )
        .await
        .expect("tool should succeed");

    for key in [
        "repo",
        "period",
        "executive_summary",
        "team_performance",
        "code_health",
        "visualization_hints",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(value["period"]["until"], json!("now"));
    assert_eq!(
        value["code_health"]["hotspots"][0]["risk_level"],
        json!("low")
    );
    assert_eq!(
        value["code_health"]["file_types_distribution"][".rs"],
        json!({ "count": 2, "percentage": 50.0 })
    );
    assert_eq!(
        value["visualization_hints"]["developer_activity"]["type"],
        json!("horizontal_bar")
    );
    assert_eq!(
        value["visualization_hints"]["hotspots"]["columns"],
        json!(["rank", "path", "commits", "developers", "risk_level"])
    );
}

#[tokio::test]
async fn test_dashboard_rejects_non_string_since() {
    let result = McpTestHarness::new()
        .invoke_with_json(
            "get_project_dashboard",
            json!({ "repo_path": "/tmp", "since": 30 }),
        )
        .await;
    assert_invalid_input_error(result);
}
