// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for the sync_repository MCP tool handler
//!
//! Every test works against a local bare origin, so no network is needed.


use chrono::DateTime;
use fixtures::RemoteSetup;
use gitscope_git::{SyncStatus, UpdateAction};
use gitscope_mcp::handlers::HandlerError;
use gitscope_mcp::responses::SyncOperation;
use mcp_harness::{McpTestHarness, assert_error_contains};
use serde_json::json;
use similar_asserts::assert_eq;
use test_utils::git_available;

/// Register origin a second time under another name
///
/// With more than one remote, `git fetch --all` announces each remote on a
/// `Fetching <remote>` line.
fn add_mirror_remote(setup: &RemoteSetup) {
    let url = setup.local.git(&["remote", "get-url", "origin"]);
    setup.local.git(&["remote", "add", "mirror", url.trim()]);
}

// ============================================================================
// fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_up_to_date() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-fetch");
    let response = McpTestHarness::new()
        .sync(setup.local.path(), None, None)
        .await
        .expect("fetch should succeed");

    assert_eq!(response.operation, SyncOperation::Fetch);
    assert!(response.summary.success);
    assert!(response.sync_result.branches_pruned.is_empty());

    let status = &response.status_after;
    assert_eq!(status.current_branch.as_deref(), Some("main"));
    assert_eq!(status.tracking.as_deref(), Some("origin/main"));
    assert_eq!((status.ahead, status.behind), (0, 0));
    assert_eq!(status.sync_status, SyncStatus::UpToDate);
}

#[tokio::test]
async fn test_fetch_lists_remotes() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-remotes");
    add_mirror_remote(&setup);

    let response = McpTestHarness::new()
        .sync(setup.local.path(), Some("fetch"), None)
        .await
        .expect("fetch should succeed");

    assert_eq!(
        response.sync_result.remotes_synced,
        vec!["mirror".to_string(), "origin".to_string()]
    );
    assert_eq!(response.summary.remotes_synced, 2);
    assert!(
        response
            .summary
            .message
            .starts_with("Successfully fetched from 2 remote(s)")
    );
}

#[tokio::test]
async fn test_fetch_new_remote_branch() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-new-branch");
    setup.push_remote_branch("feature-remote");

    let response = McpTestHarness::new()
        .sync(setup.local.path(), Some("fetch"), None)
        .await
        .expect("fetch should succeed");

    let new_branches: Vec<_> = response
        .sync_result
        .branches_updated
        .iter()
        .filter(|u| u.action == UpdateAction::New)
        .collect();
    assert_eq!(new_branches.len(), 1);
    assert_eq!(new_branches[0].remote.as_str(), "origin");
    assert_eq!(new_branches[0].branch.as_str(), "feature-remote");
    assert!(response.summary.message.contains("branch(es) updated"));

    let branches = setup.local.git(&["branch", "--remotes"]);
    assert!(branches.contains("origin/feature-remote"));
}

#[tokio::test]
async fn test_fetch_prunes_deleted_branch() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-prune");
    setup.push_remote_branch("short-lived");
    McpTestHarness::new()
        .sync(setup.local.path(), Some("fetch"), None)
        .await
        .expect("first fetch should succeed");

    setup.delete_remote_branch("short-lived");
    let response = McpTestHarness::new()
        .sync(setup.local.path(), Some("fetch"), None)
        .await
        .expect("second fetch should succeed");

    assert_eq!(
        response.sync_result.branches_pruned,
        vec!["short-lived".to_string()]
    );
    assert_eq!(response.summary.branches_pruned, 1);
    assert!(response.summary.message.ends_with("1 branch(es) pruned"));
}

#[tokio::test]
async fn test_fetch_reports_behind() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-behind");
    setup.push_remote_commit("remote.txt", "from the collaborator\n");

    let response = McpTestHarness::new()
        .sync(setup.local.path(), Some("fetch"), None)
        .await
        .expect("fetch should succeed");

    let status = &response.status_after;
    assert_eq!((status.ahead, status.behind), (0, 1));
    assert_eq!(status.sync_status, SyncStatus::Behind);
    // Fetch leaves the working tree alone
    assert!(!setup.local.file_exists("remote.txt"));
}

// ============================================================================
// pull
// ============================================================================

#[tokio::test]
async fn test_pull_brings_in_remote_commit() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-pull");
    setup.push_remote_commit("remote.txt", "from the collaborator\n");
    let harness = McpTestHarness::new();

    let response = harness
        .sync(setup.local.path(), Some("pull"), None)
        .await
        .expect("pull should succeed");

    assert_eq!(response.operation, SyncOperation::Pull);
    assert_eq!(
        response.summary.message.as_str(),
        "Successfully pulled latest changes"
    );
    assert!(response.sync_result.raw_output.starts_with("PULL:\n"));
    assert!(setup.local.file_exists("remote.txt"));
    assert_eq!(response.status_after.sync_status, SyncStatus::UpToDate);

    let again = harness
        .sync(setup.local.path(), Some("pull"), None)
        .await
        .expect("second pull should succeed");
    assert_eq!(
        again.summary.message.as_str(),
        "Already up to date with remote"
    );
}

#[tokio::test]
async fn test_pull_checks_out_branch_first() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-checkout");
    setup.local.git(&["checkout", "--quiet", "-b", "side"]);

    let response = McpTestHarness::new()
        .sync(setup.local.path(), Some("pull"), Some("main"))
        .await
        .expect("pull should succeed");

    let raw = &response.sync_result.raw_output;
    assert!(raw.starts_with("CHECKOUT:\n"));
    assert!(raw.contains("\n\nPULL:\n"));
    assert_eq!(response.status_after.current_branch.as_deref(), Some("main"));
}

#[tokio::test]
async fn test_pull_unknown_branch_fails() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-bad-branch");

    let result = McpTestHarness::new()
        .sync(setup.local.path(), Some("pull"), Some("no-such-branch"))
        .await;
    assert!(matches!(result, Err(HandlerError::Git(_))));
}

// ============================================================================
// Input and Output
// ============================================================================

#[tokio::test]
async fn test_sync_invalid_operation() {
    let result = McpTestHarness::new()
        .invoke_with_json(
            "sync_repository",
            json!({ "repo_path": "/nonexistent", "operation": "push" }),
        )
        .await;
    assert_error_contains(result, "Invalid operation 'push'. Must be 'fetch' or 'pull'");
}

#[tokio::test]
async fn test_sync_json_shape() {
    if !git_available() {
        return;
    }
    let setup = RemoteSetup::new("sync-json");
    let value = McpTestHarness::new()
        .invoke_with_json(
            "sync_repository",
            json!({ "repo_path": setup.local.path_str() }),
        )
        .await
        .expect("tool should succeed");

    assert_eq!(value["operation"], json!("fetch"));
    assert_eq!(value["summary"]["success"], json!(true));
    assert_eq!(value["status_after"]["sync_status"], json!("up-to-date"));

    let timestamp = value["timestamp"].as_str().expect("timestamp string");
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}
