// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! File extension histograms

use indexmap::IndexMap;

/// Label for paths without a `.`
pub const NO_EXTENSION: &str = "(no extension)";

/// Extension label of a path: `.` plus everything after the last `.`
///
/// The whole path is searched, so a dot in a directory name counts.
///
/// # Example
///
/// ```
/// use gitscope_stats::extension::extension_of;
///
/// assert_eq!(extension_of("src/main.rs"), ".rs");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("Makefile"), "(no extension)");
/// ```
#[must_use]
pub fn extension_of(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((_, ext)) => format!(".{ext}"),
        None => NO_EXTENSION.to_string(),
    }
}

/// Count extensions over distinct paths, most common first
///
/// Ties keep the order in which each extension was first seen. Only the
/// `limit` most common entries are kept.
#[must_use]
pub fn extension_histogram<'a, I>(paths: I, limit: usize) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for path in paths {
        *counts.entry(extension_of(path)).or_default() += 1;
    }
    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts.truncate(limit);
    counts
}
