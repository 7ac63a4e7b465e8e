#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    for commit in gitscope_git::parse_commit_log(&text) {
        let stats = commit.stats();
        assert_eq!(stats.total_files, commit.files().len());
    }
    let _ = gitscope_git::parse_file_history(&text);
    let _ = gitscope_git::parse_branches(&text);
    let _ = gitscope_git::parse_fetch_output(&text);
    let _ = gitscope_git::parse_status_output(&text);
});
