#![no_main]

//! Fuzz target for tool dispatch
//!
//! Feeds arbitrary JSON objects to every tool. Git is pointed at a program
//! that does not exist, so only input validation and repository discovery
//! run; every call must return instead of panicking.

use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use gitscope_git::GitRunner;
use gitscope_mcp::handlers::{self, TOOL_NAMES, ToolContext};

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Object(args)) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let Ok(runtime) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return;
    };

    let ctx = ToolContext::new(
        GitRunner::new().with_program("/nonexistent/bin/git-gitscope-fuzz"),
        None,
    );
    let tool = TOOL_NAMES[data.len() % TOOL_NAMES.len()];

    runtime.block_on(async {
        let _ = handlers::call_tool(&ctx, tool, Some(args)).await;
    });
});
