//! Change sets fed to the synchronizer.
//!
//! Incremental runs take them from `git diff -z --name-status`; full runs from
//! walking every mapped root on disk.

use crate::error::{PublishError, PublishResult};
use crate::mapping::CategoryMapping;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "A",
            Self::Modified => "M",
            Self::Deleted => "D",
        })
    }
}

/// A path relative to the repository root and what happened to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileChange {
    pub status: ChangeStatus,
    pub path: String,
}

impl FileChange {
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    pub fn added(path: impl Into<String>) -> Self {
        Self::new(ChangeStatus::Added, path)
    }

    pub fn modified(path: impl Into<String>) -> Self {
        Self::new(ChangeStatus::Modified, path)
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self::new(ChangeStatus::Deleted, path)
    }
}

/// Parses `git diff -z --name-status` output, keeping record order.
///
/// Each record is a status field followed by one path, or two for renames
/// and copies, all NUL-terminated. Paths are taken verbatim. Renames expand
/// to a delete of the old path followed by an add of the new one; copies to
/// an add of the destination. Type changes count as modifications. Records
/// with an unknown status are skipped.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    let mut changes = Vec::new();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(status) = fields.next() {
        let status = status.trim();
        match status.chars().next() {
            Some(kind @ ('A' | 'M' | 'T' | 'D')) => {
                let Some(path) = fields.next() else { break };
                changes.push(match kind {
                    'A' => FileChange::added(path),
                    'D' => FileChange::deleted(path),
                    _ => FileChange::modified(path),
                });
            }
            Some(kind @ ('R' | 'C')) => {
                let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
                    break;
                };
                if kind == 'R' {
                    changes.push(FileChange::deleted(from));
                }
                changes.push(FileChange::added(to));
            }
            _ => {
                let path = fields.next();
                debug!("skipping diff record {status:?} {path:?}");
            }
        }
    }

    changes
}

/// Changes between `reference` and the working tree under `assets_root`.
///
/// Any failure to obtain the diff is logged and yields an empty change set.
pub async fn git_diff_changes(repo_root: &Path, reference: &str, assets_root: &str) -> Vec<FileChange> {
    let pathspec = format!("{}/", assets_root.trim_end_matches('/'));

    let output = tokio::process::Command::new("git")
        .args([
            "diff",
            "-z",
            "--name-status",
            "--no-renames",
            "--end-of-options",
            reference,
            "--",
            pathspec.as_str(),
        ])
        .current_dir(repo_root)
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            warn!("failed to run git diff against {reference}: {e}");
            return Vec::new();
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            "failed to get git diff against {reference} ({}): {}",
            output.status,
            stderr.trim()
        );
        return Vec::new();
    }

    match String::from_utf8(output.stdout) {
        Ok(stdout) => parse_name_status(&stdout),
        Err(e) => {
            warn!("git diff output is not UTF-8: {e}");
            Vec::new()
        }
    }
}

/// Every file under each mapped root, in mapping order, as additions.
///
/// Entries within a root are sorted by file name. Roots missing on disk are
/// skipped.
pub fn enumerate_all(repo_root: &Path, mapping: &CategoryMapping) -> PublishResult<Vec<FileChange>> {
    let mut changes = Vec::new();

    for entry in mapping.entries() {
        let root = repo_root.join(&entry.local_root);
        if !root.exists() {
            warn!("skipping missing asset root {}", root.display());
            continue;
        }

        for item in WalkDir::new(&root).sort_by_file_name() {
            let item = item.map_err(|e| PublishError::Walk(e.to_string()))?;
            if !item.file_type().is_file() {
                continue;
            }
            let relative = item
                .path()
                .strip_prefix(repo_root)
                .map_err(|e| PublishError::Walk(format!("{}: {e}", item.path().display())))?;
            changes.push(FileChange::added(to_slash_path(relative)));
        }
    }

    Ok(changes)
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
