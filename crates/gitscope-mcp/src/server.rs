// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! MCP server implementation for gitscope-mcp
//!
//! This module provides the MCP server that exposes repository analytics
//! (history, developer statistics, file history, sync and the project
//! dashboard) to LLMs via MCP tool calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::McpServer;
use rust_mcp_sdk::mcp_server::ServerHandler;
use rust_mcp_sdk::schema::{
    CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams, RpcError,
    TextContent, Tool, ToolInputSchema, schema_utils::CallToolError,
};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::handlers::{self, HandlerError, ToolContext};

/// Convert a JSON object into the properties format expected by ToolInputSchema.
///
/// ToolInputSchema expects `HashMap<String, Map<String, Value>>` for properties,
/// where each key maps to a JSON object describing that property's schema.
fn make_properties(json_obj: Value) -> HashMap<String, Map<String, Value>> {
    let mut properties = HashMap::new();
    if let Value::Object(obj) = json_obj {
        for (key, value) in obj {
            if let Value::Object(inner) = value {
                properties.insert(key, inner);
            }
        }
    }
    properties
}

/// Schema entry shared by every tool
fn repo_path_property() -> Value {
    json!({
        "type": "string",
        "description": "Absolute path to git repository (defaults to the server's --repo)"
    })
}

fn date_property(example: &str) -> Value {
    json!({
        "type": "string",
        "description": format!("Date filter passed to git (e.g., \"{example}\")")
    })
}

fn tool(name: &str, title: &str, description: &str, required: &[&str], properties: Value) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: ToolInputSchema::new(
            required.iter().map(|r| (*r).to_string()).collect(),
            Some(make_properties(properties)),
            None,
        ),
        annotations: None,
        execution: None,
        icons: vec![],
        meta: None,
        output_schema: None,
        title: Some(title.into()),
    }
}

/// The main gitscope MCP server handler
///
/// Every tool call runs git afresh; the server holds no state beyond its
/// configuration.
pub struct GitscopeServer {
    ctx: ToolContext,
}

impl GitscopeServer {
    /// Create a new server around a tool context
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// The context handed to every handler
    #[must_use]
    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Build the list of available tools
    pub fn build_tools() -> Vec<Tool> {
        vec![
            Self::branch_list_tool(),
            Self::commit_history_tool(),
            Self::developer_stats_tool(),
            Self::compare_developers_tool(),
            Self::file_changes_tool(),
            Self::sync_tool(),
            Self::dashboard_tool(),
        ]
    }

    fn branch_list_tool() -> Tool {
        tool(
            handlers::GET_BRANCH_LIST,
            "Branch List",
            "List all local and remote branches with their last commit dates, \
             most recently committed first.",
            &[],
            json!({ "repo_path": repo_path_property() }),
        )
    }

    fn commit_history_tool() -> Tool {
        tool(
            handlers::GET_COMMIT_HISTORY,
            "Commit History",
            "Get detailed commit history with file changes and statistics. Returns \
             a summary with total changes, unique authors and date range.",
            &[],
            json!({
                "repo_path": repo_path_property(),
                "branch": {
                    "type": "string",
                    "description": "Specific branch (default: all branches)"
                },
                "max_count": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum commits to return (recommended: 50-100)"
                },
                "since": date_property("1 week ago"),
                "until": date_property("yesterday"),
                "author": {
                    "type": "string",
                    "description": "Filter by author name or email"
                }
            }),
        )
    }

    fn developer_stats_tool() -> Tool {
        tool(
            handlers::GET_DEVELOPER_STATS,
            "Developer Statistics",
            "Get statistics about one developer's contributions: commits, files \
             changed, additions and deletions, most active files and file types.",
            &["author"],
            json!({
                "repo_path": repo_path_property(),
                "author": {
                    "type": "string",
                    "description": "Developer name or email (e.g., \"John Doe\", \"john@example.com\")"
                },
                "since": date_property("2025-01-01"),
                "until": date_property("today")
            }),
        )
    }

    fn compare_developers_tool() -> Tool {
        tool(
            handlers::COMPARE_DEVELOPER_STATS,
            "Compare Developers",
            "Compare contribution statistics between 2 and 10 developers, with \
             rankings per metric and totals across all of them.",
            &["authors"],
            json!({
                "repo_path": repo_path_property(),
                "authors": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 2,
                    "maxItems": 10,
                    "description": "Developer names or emails to compare"
                },
                "since": date_property("1 month ago"),
                "until": date_property("today")
            }),
        )
    }

    fn file_changes_tool() -> Tool {
        tool(
            handlers::GET_FILE_CHANGES,
            "File Change History",
            "Get the change history of a single file, following renames, with \
             line counts per commit and a summary of authors.",
            &["file_path"],
            json!({
                "repo_path": repo_path_property(),
                "file_path": {
                    "type": "string",
                    "description": "Path relative to the repository root"
                },
                "since": date_property("3 months ago"),
                "until": date_property("today"),
                "max_count": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum commits to return"
                }
            }),
        )
    }

    fn sync_tool() -> Tool {
        tool(
            handlers::SYNC_REPOSITORY,
            "Sync Repository",
            "Sync the repository with its remotes. \"fetch\" downloads updates without \
             changing files; \"pull\" also updates the working tree.",
            &[],
            json!({
                "repo_path": repo_path_property(),
                "operation": {
                    "type": "string",
                    "enum": ["fetch", "pull"],
                    "default": "fetch",
                    "description": "Type of sync"
                },
                "branch": {
                    "type": "string",
                    "description": "Branch to check out before pulling (pull only)"
                }
            }),
        )
    }

    fn dashboard_tool() -> Tool {
        tool(
            handlers::GET_PROJECT_DASHBOARD,
            "Project Dashboard",
            "Generate a project dashboard: executive summary, team performance with \
             activity alerts, code health (hotspots, churn, file types) and \
             visualization hints.",
            &[],
            json!({
                "repo_path": repo_path_property(),
                "since": {
                    "type": "string",
                    "default": "30 days ago",
                    "description": "Analyze commits since this date"
                },
                "until": date_property("now")
            }),
        )
    }
}

/// ServerHandler implementation for the MCP protocol
#[async_trait]
impl ServerHandler for GitscopeServer {
    /// Handle requests to list available tools
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: Self::build_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to call a specific tool
    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        debug!(tool = %params.name, "Calling tool");

        match handlers::call_tool(&self.ctx, &params.name, params.arguments).await {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).map_err(CallToolError::new)?;
                Ok(CallToolResult::text_content(vec![TextContent::new(
                    text, None, None,
                )]))
            }
            Err(HandlerError::UnknownTool(name)) => Err(CallToolError::unknown_tool(&name)),
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                Err(CallToolError::new(e))
            }
        }
    }
}
