// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tool handlers for the MCP server
//!
//! This module implements the handlers for each MCP tool, bridging
//! MCP requests to git queries and returning assembled responses.

use std::path::PathBuf;

use gitscope_git::query::{branch_list_args, checkout_args, fetch_args, pull_args, status_args};
use gitscope_git::{
    FileHistoryQuery, GitError, GitRunner, LogQuery, RepoPath, ensure_repository,
    parse_branches, parse_commit_log, parse_fetch_output, parse_file_history,
    parse_status_output,
};
use gitscope_stats::{
    DeveloperEntry, StatsError, analyze_dashboard, analyze_developer, compare_developers,
    validate_roster,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::responses::{
    self, BranchListResponse, CommitHistoryResponse, ComparisonResponse, DEFAULT_DASHBOARD_SINCE,
    DashboardRepo, DashboardResponse, DeveloperStatsResponse, FileChangesResponse, FileRef,
    FileTimeRange, RepoRef, SyncOperation, SyncResponse, TimeRange,
};

// ============================================================================
// Tool Names
// ============================================================================

/// Branch listing tool
pub const GET_BRANCH_LIST: &str = "get_branch_list";
/// Commit history tool
pub const GET_COMMIT_HISTORY: &str = "get_commit_history";
/// Single developer statistics tool
pub const GET_DEVELOPER_STATS: &str = "get_developer_stats";
/// Developer comparison tool
pub const COMPARE_DEVELOPER_STATS: &str = "compare_developer_stats";
/// Single file history tool
pub const GET_FILE_CHANGES: &str = "get_file_changes";
/// Fetch/pull tool
pub const SYNC_REPOSITORY: &str = "sync_repository";
/// Project dashboard tool
pub const GET_PROJECT_DASHBOARD: &str = "get_project_dashboard";

/// Every tool name, in listing order
pub const TOOL_NAMES: [&str; 7] = [
    GET_BRANCH_LIST,
    GET_COMMIT_HISTORY,
    GET_DEVELOPER_STATS,
    COMPARE_DEVELOPER_STATS,
    GET_FILE_CHANGES,
    SYNC_REPOSITORY,
    GET_PROJECT_DASHBOARD,
];

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Git could not be run or the repository is unusable
    #[error("{0}")]
    Git(#[from] GitError),

    /// Developer roster outside the accepted size
    #[error("{0}")]
    Stats(#[from] StatsError),

    /// Invalid input - missing or malformed field
    #[error("Invalid input: {0}. Check the tool's required parameters.")]
    InvalidInput(String),

    /// JSON serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No tool with this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

// ============================================================================
// Input Types
// ============================================================================

/// Input for the get_branch_list tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchListInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
}

/// Input for the get_commit_history tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitHistoryInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
    /// Branch to walk (default: all branches)
    pub branch: Option<String>,
    /// Maximum commits to return
    pub max_count: Option<usize>,
    /// Commits since date
    pub since: Option<String>,
    /// Commits until date
    pub until: Option<String>,
    /// Author name or email pattern
    pub author: Option<String>,
}

/// Input for the get_developer_stats tool
#[derive(Debug, Clone, Deserialize)]
pub struct DeveloperStatsInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
    /// Developer name or email
    pub author: String,
    /// Commits since date
    pub since: Option<String>,
    /// Commits until date
    pub until: Option<String>,
}

/// Input for the compare_developer_stats tool
#[derive(Debug, Clone, Deserialize)]
pub struct CompareDevelopersInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
    /// Two to ten developer names or emails
    pub authors: Vec<String>,
    /// Commits since date
    pub since: Option<String>,
    /// Commits until date
    pub until: Option<String>,
}

/// Input for the get_file_changes tool
#[derive(Debug, Clone, Deserialize)]
pub struct FileChangesInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
    /// Path relative to the repository
    pub file_path: String,
    /// Commits since date
    pub since: Option<String>,
    /// Commits until date
    pub until: Option<String>,
    /// Maximum commits to return
    pub max_count: Option<usize>,
}

/// Input for the sync_repository tool
#[derive(Debug, Clone, Deserialize)]
pub struct SyncInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
    /// `fetch` or `pull`
    #[serde(default = "default_sync_operation")]
    pub operation: String,
    /// Branch to check out before pulling
    pub branch: Option<String>,
}

fn default_sync_operation() -> String {
    "fetch".to_string()
}

/// Input for the get_project_dashboard tool
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardInput {
    /// Repository path (falls back to the configured default)
    pub repo_path: Option<String>,
    /// Analyze commits since this date
    #[serde(default = "default_dashboard_since")]
    pub since: String,
    /// Analyze commits until this date
    pub until: Option<String>,
}

fn default_dashboard_since() -> String {
    DEFAULT_DASHBOARD_SINCE.to_string()
}

// ============================================================================
// Context
// ============================================================================

/// Shared state for every tool call
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    runner: GitRunner,
    default_repo: Option<PathBuf>,
}

impl ToolContext {
    /// Create a context from a runner and an optional default repository
    #[must_use]
    pub fn new(runner: GitRunner, default_repo: Option<PathBuf>) -> Self {
        Self {
            runner,
            default_repo,
        }
    }

    /// Build the context described by the command-line configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.runner(), config.repo.clone())
    }

    /// The git runner used by every handler
    #[must_use]
    pub fn runner(&self) -> &GitRunner {
        &self.runner
    }

    /// Repository used when a call omits `repo_path`
    #[must_use]
    pub fn default_repo(&self) -> Option<&PathBuf> {
        self.default_repo.as_ref()
    }

    /// Pick the requested or default repository and validate it
    ///
    /// Returns the path as the caller named it along with the validated
    /// repository.
    fn resolve_repo(&self, requested: Option<String>) -> Result<(String, RepoPath), HandlerError> {
        let path = requested
            .or_else(|| self.default_repo.as_ref().map(|p| p.display().to_string()))
            .ok_or_else(|| {
                HandlerError::InvalidInput(
                    "repo_path is required when no default repository is configured".to_string(),
                )
            })?;

        let repo = ensure_repository(&path)?;
        Ok((path, repo))
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse input from MCP arguments into a typed struct
fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args
        .map(Value::Object)
        .unwrap_or(Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

fn require_non_empty(value: &str, what: &str) -> Result<(), HandlerError> {
    if value.trim().is_empty() {
        return Err(HandlerError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Handle the get_branch_list tool
///
/// Lists local and remote branches, most recently committed first.
pub async fn handle_branch_list(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<BranchListResponse, HandlerError> {
    let input: BranchListInput = parse_input(args)?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    let raw = ctx.runner.run(repo.as_path(), &branch_list_args()).await?;
    Ok(responses::branch_list(RepoRef::new(path), parse_branches(&raw)))
}

/// Handle the get_commit_history tool
pub async fn handle_commit_history(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<CommitHistoryResponse, HandlerError> {
    let input: CommitHistoryInput = parse_input(args)?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    let query = LogQuery {
        branch: input.branch,
        max_count: input.max_count,
        since: input.since,
        until: input.until,
        author: input.author,
    };
    let raw = ctx.runner.run(repo.as_path(), &query.to_args()).await?;
    let commits = parse_commit_log(&raw);
    debug!(commits = commits.len(), "Parsed commit history");

    Ok(responses::commit_history(RepoRef::new(path), query, commits))
}

/// Handle the get_developer_stats tool
///
/// Aggregates every commit whose author matches the given name or email.
pub async fn handle_developer_stats(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<DeveloperStatsResponse, HandlerError> {
    let input: DeveloperStatsInput = parse_input(args)?;
    require_non_empty(&input.author, "author")?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    let query = LogQuery {
        since: input.since.clone(),
        until: input.until.clone(),
        author: Some(input.author.clone()),
        ..Default::default()
    };
    let raw = ctx.runner.run(repo.as_path(), &query.to_args()).await?;
    let commits = parse_commit_log(&raw);
    let stats = analyze_developer(&commits);

    let range = TimeRange {
        since: input.since,
        until: input.until,
    };
    Ok(responses::developer_stats(
        RepoRef::new(path),
        &input.author,
        range,
        &commits,
        stats,
    ))
}

/// Handle the compare_developer_stats tool
///
/// The roster is checked before the repository is touched.
pub async fn handle_compare_developers(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<ComparisonResponse, HandlerError> {
    let input: CompareDevelopersInput = parse_input(args)?;
    validate_roster(input.authors.as_slice())?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    let mut entries = Vec::with_capacity(input.authors.len());
    for author in &input.authors {
        let query = LogQuery {
            since: input.since.clone(),
            until: input.until.clone(),
            author: Some(author.clone()),
            ..Default::default()
        };
        let raw = ctx.runner.run(repo.as_path(), &query.to_args()).await?;
        let stats = analyze_developer(&parse_commit_log(&raw));
        entries.push(DeveloperEntry::new(author.clone(), stats));
    }

    let comparison = compare_developers(&entries);
    let range = TimeRange {
        since: input.since,
        until: input.until,
    };
    Ok(responses::comparison(
        RepoRef::new(path),
        range,
        &entries,
        comparison,
    ))
}

/// Handle the get_file_changes tool
///
/// Follows the file across renames.
pub async fn handle_file_changes(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<FileChangesResponse, HandlerError> {
    let input: FileChangesInput = parse_input(args)?;
    require_non_empty(&input.file_path, "file_path")?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    let query = FileHistoryQuery {
        path: input.file_path.clone(),
        since: input.since.clone(),
        until: input.until.clone(),
        max_count: input.max_count,
    };
    let raw = ctx.runner.run(repo.as_path(), &query.to_args()).await?;

    let file = FileRef {
        exists: repo.contains(&input.file_path),
        path: input.file_path,
    };
    let time_range = FileTimeRange {
        since: input.since,
        until: input.until,
        max_count: input.max_count,
    };
    Ok(responses::file_changes(
        RepoRef::new(path),
        file,
        time_range,
        parse_file_history(&raw),
    ))
}

/// Handle the sync_repository tool
///
/// `fetch` only updates remote-tracking refs. `pull` also updates the
/// working tree, optionally after checking out `branch`.
pub async fn handle_sync(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<SyncResponse, HandlerError> {
    let input: SyncInput = parse_input(args)?;
    let operation = SyncOperation::parse(&input.operation).ok_or_else(|| {
        HandlerError::InvalidInput(format!(
            "Invalid operation '{}'. Must be 'fetch' or 'pull'",
            input.operation
        ))
    })?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    info!(repo = %path, operation = %input.operation, "Syncing repository");

    let transcript = match operation {
        SyncOperation::Fetch => ctx
            .runner
            .output(repo.as_path(), &fetch_args())
            .await?
            .combined(),
        SyncOperation::Pull => {
            let mut parts = Vec::new();
            if let Some(branch) = &input.branch {
                let checkout = ctx
                    .runner
                    .output(repo.as_path(), &checkout_args(branch))
                    .await?;
                parts.push(format!("CHECKOUT:\n{}", checkout.combined()));
            }
            let pull = ctx.runner.output(repo.as_path(), &pull_args()).await?;
            parts.push(format!("PULL:\n{}", pull.combined()));
            parts.join("\n\n")
        }
    };

    let status = ctx.runner.run(repo.as_path(), &status_args()).await?;

    Ok(responses::sync(
        RepoRef::new(path),
        operation,
        chrono::Local::now().to_rfc3339(),
        parse_fetch_output(&transcript),
        parse_status_output(&status),
    ))
}

/// Handle the get_project_dashboard tool
pub async fn handle_dashboard(
    ctx: &ToolContext,
    args: Option<Map<String, Value>>,
) -> Result<DashboardResponse, HandlerError> {
    let input: DashboardInput = parse_input(args)?;
    let (path, repo) = ctx.resolve_repo(input.repo_path)?;

    let query = LogQuery {
        since: Some(input.since.clone()),
        until: input.until.clone(),
        ..Default::default()
    };
    let raw = ctx.runner.run(repo.as_path(), &query.to_args()).await?;
    let commits = parse_commit_log(&raw);
    let analysis = analyze_dashboard(&commits);

    let repo_ref = DashboardRepo {
        name: repo.name(),
        path,
    };
    Ok(responses::dashboard(
        repo_ref,
        input.since,
        input.until,
        commits.len(),
        analysis,
    ))
}

/// Run the named tool and return its result as JSON
///
/// # Errors
///
/// Returns `HandlerError::UnknownTool` for a name not in [`TOOL_NAMES`],
/// otherwise whatever the tool's handler returns.
pub async fn call_tool(
    ctx: &ToolContext,
    name: &str,
    args: Option<Map<String, Value>>,
) -> Result<Value, HandlerError> {
    let value = match name {
        GET_BRANCH_LIST => serde_json::to_value(handle_branch_list(ctx, args).await?)?,
        GET_COMMIT_HISTORY => serde_json::to_value(handle_commit_history(ctx, args).await?)?,
        GET_DEVELOPER_STATS => serde_json::to_value(handle_developer_stats(ctx, args).await?)?,
        COMPARE_DEVELOPER_STATS => {
            serde_json::to_value(handle_compare_developers(ctx, args).await?)?
        }
        GET_FILE_CHANGES => serde_json::to_value(handle_file_changes(ctx, args).await?)?,
        SYNC_REPOSITORY => serde_json::to_value(handle_sync(ctx, args).await?)?,
        GET_PROJECT_DASHBOARD => serde_json::to_value(handle_dashboard(ctx, args).await?)?,
        _ => return Err(HandlerError::UnknownTool(name.to_string())),
    };
    Ok(value)
}
