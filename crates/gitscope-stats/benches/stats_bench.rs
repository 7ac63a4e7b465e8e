// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gitscope_git::{CommitHeader, CommitRecord, FileChange};
use gitscope_stats::compare::{DeveloperEntry, compare_developers};
use gitscope_stats::{analyze_dashboard, analyze_developer};
use std::hint::black_box;

/// A window of commits spread over 20 authors, 200 paths and 30 days
fn sample_commits(count: usize) -> Vec<CommitRecord> {
    (0..count)
        .map(|i| {
            let header = CommitHeader {
                hash: format!("{i:040x}"),
                author_name: format!("Author {}", i % 20),
                author_email: format!("author{}@example.com", i % 20),
                date: format!("2025-01-{:02} 10:00:00 +0000", 30 - i % 30),
                message: format!("Commit {i}"),
            };
            let files = (0..4)
                .map(|f| FileChange {
                    path: format!("src/dir{}/file{}.{}", i % 10, (i + f) % 20, ["rs", "md", "toml"][f % 3]),
                    additions: (i * 7 + f) as u64 % 120,
                    deletions: (i * 3 + f) as u64 % 80,
                })
                .collect();
            CommitRecord::new(header, files)
        })
        .collect()
}

fn analytics_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");
    for size in [100, 1000, 5000] {
        let commits = sample_commits(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &commits, |b, commits| {
            b.iter(|| analyze_dashboard(black_box(commits)))
        });
    }
    group.finish();

    let commits = sample_commits(1000);
    c.bench_function("developer_stats_1000", |b| {
        b.iter(|| analyze_developer(black_box(&commits)))
    });

    let entries: Vec<DeveloperEntry> = (0..10)
        .map(|i| DeveloperEntry::new(format!("dev{i}"), analyze_developer(&commits[i * 50..(i + 1) * 50])))
        .collect();
    c.bench_function("compare_10_developers", |b| {
        b.iter(|| compare_developers(black_box(&entries)))
    });
}

criterion_group!(benches, analytics_benchmarks);
criterion_main!(benches);
