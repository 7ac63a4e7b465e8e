#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let commits = gitscope_git::parse_commit_log(&text);

    let dashboard = gitscope_stats::analyze_dashboard(&commits);
    assert_eq!(dashboard.executive_summary.total_commits, commits.len());
    assert!(dashboard.code_health.hotspots.len() <= 10);

    let stats = gitscope_stats::analyze_developer(&commits);
    assert!(stats.most_active_files.len() <= 20);
});
