// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository path validation

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// A directory known to be inside a git work tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    path: PathBuf,
    workdir: Option<PathBuf>,
}

impl RepoPath {
    /// The path exactly as the caller supplied it
    ///
    /// Git commands run here so relative pathspecs resolve the way the
    /// caller expects.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Root of the work tree, if the repository has one
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Final component of the work tree root (used as the display name)
    #[must_use]
    pub fn name(&self) -> String {
        let root = self.workdir.as_deref().unwrap_or(&self.path);
        root.canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(root)
            .file_name()
            .map_or_else(
                || root.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            )
    }

    /// Whether `relative` exists on disk, resolved against [`Self::as_path`]
    #[must_use]
    pub fn contains(&self, relative: &str) -> bool {
        self.path.join(relative).exists()
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Check that `path` is a directory inside a git repository
///
/// The repository is found by walking up from `path`, so any subdirectory
/// of a work tree is accepted.
///
/// # Errors
///
/// - `GitError::InvalidPath` if `path` is empty or whitespace
/// - `GitError::RepositoryNotFound` if `path` is not a directory or no
///   repository contains it
pub fn ensure_repository(path: &str) -> Result<RepoPath, GitError> {
    if path.trim().is_empty() {
        return Err(GitError::InvalidPath {
            path: path.to_string(),
        });
    }

    let dir = Path::new(path);
    if !dir.is_dir() {
        return Err(GitError::RepositoryNotFound {
            path: path.to_string(),
        });
    }

    let repo = Repository::discover(dir).map_err(|e| {
        debug!(path, error = %e, "Repository discovery failed");
        GitError::RepositoryNotFound {
            path: path.to_string(),
        }
    })?;

    Ok(RepoPath {
        path: dir.to_path_buf(),
        workdir: repo.workdir().map(Path::to_path_buf),
    })
}
