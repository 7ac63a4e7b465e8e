#![no_main]

//! Fuzz target for tool argument parsing
//!
//! Arbitrary bytes must never panic when parsed as the arguments of any
//! tool.

use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

use gitscope_mcp::handlers::{
    BranchListInput, CommitHistoryInput, CompareDevelopersInput, DashboardInput,
    DeveloperStatsInput, FileChangesInput, SyncInput,
};
use gitscope_mcp::responses::SyncOperation;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _: Result<Value, _> = serde_json::from_str(s);

        let _: Result<BranchListInput, _> = serde_json::from_str(s);
        let _: Result<CommitHistoryInput, _> = serde_json::from_str(s);
        let _: Result<DeveloperStatsInput, _> = serde_json::from_str(s);
        let _: Result<CompareDevelopersInput, _> = serde_json::from_str(s);
        let _: Result<FileChangesInput, _> = serde_json::from_str(s);
        let _: Result<DashboardInput, _> = serde_json::from_str(s);

        if let Ok(input) = serde_json::from_str::<SyncInput>(s) {
            let _ = SyncOperation::parse(&input.operation);
        }

        let _: Result<Map<String, Value>, _> = serde_json::from_str(s);
    }

    let _: Result<Value, _> = serde_json::from_slice(data);
});
