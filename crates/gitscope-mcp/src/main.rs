// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitscope-mcp: MCP server for repository activity analytics
//!
//! This binary serves the gitscope tools over MCP stdio, or runs a single
//! tool from the command line with the `run` subcommand.

use anyhow::{Context, anyhow, bail};
use clap::Parser;
use rust_mcp_sdk::mcp_server::{McpServerOptions, ToMcpServerHandler, server_runtime};
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities,
    ServerCapabilitiesTools,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitscope_mcp::config::{Command, Config};
use gitscope_mcp::handlers::{self, ToolContext};
use gitscope_mcp::server::GitscopeServer;

const SERVER_INSTRUCTIONS: &str = "Repository activity analytics over git history. \
Every tool takes repo_path; call sync_repository first when remote data matters.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays reserved for the MCP transport
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .init();

    config.validate()?;
    let ctx = ToolContext::from_config(&config);

    match config.command {
        Some(Command::Run { tool, args }) => run_tool(&ctx, &tool, &args).await,
        None => serve(ctx).await,
    }
}

/// Run one tool and print its result to stdout
async fn run_tool(ctx: &ToolContext, tool: &str, args: &str) -> anyhow::Result<()> {
    let args = match serde_json::from_str(args).context("Tool arguments must be valid JSON")? {
        Value::Object(map) => map,
        other => bail!("Tool arguments must be a JSON object, got: {other}"),
    };

    let result = handlers::call_tool(ctx, tool, Some(args)).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Serve every tool over MCP stdio until the client disconnects
async fn serve(ctx: ToolContext) -> anyhow::Result<()> {
    info!(
        default_repo = ?ctx.default_repo(),
        git = %ctx.runner().program().display(),
        "Starting gitscope-mcp server"
    );

    let server_details = InitializeResult {
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").into(),
            version: env!("CARGO_PKG_VERSION").into(),
            title: Some("Gitscope MCP Server".into()),
            description: Some(env!("CARGO_PKG_DESCRIPTION").into()),
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(SERVER_INSTRUCTIONS.into()),
        protocol_version: ProtocolVersion::V2025_11_25.into(),
    };

    let transport = StdioTransport::new(TransportOptions::default())
        .map_err(|e| anyhow!("Failed to open stdio transport: {e}"))?;

    let server = server_runtime::create_server(McpServerOptions {
        server_details,
        transport,
        handler: GitscopeServer::new(ctx).to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    server
        .start()
        .await
        .map_err(|e| anyhow!("MCP server stopped with an error: {e}"))?;

    info!("gitscope-mcp server stopped");
    Ok(())
}
