//! Mirrors local asset changes into the current build's remote prefix.

use crate::build::BuildContext;
use crate::changes::{self, ChangeStatus, FileChange};
use crate::config::PublishConfig;
use crate::error::{PublishError, PublishResult};
use crate::mapping::{CategoryMapping, RemoteObjectKey};
use cdnsync_storage::ObjectStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Which files a run considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMode {
    /// Every file under every mapped root.
    Full,
    /// Only files changed relative to the diff reference.
    Incremental,
}

impl SyncMode {
    /// `all` selects a full run; anything else, including nothing, is incremental.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("all") => Self::Full,
            _ => Self::Incremental,
        }
    }
}

/// Counts of what a run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub uploaded: usize,
    pub deleted: usize,
    /// Added/modified entries whose local file was gone.
    pub skipped: usize,
    /// Entries outside every mapped root.
    pub unmapped: usize,
}

/// Publishes change sets for one build.
pub struct AssetSynchronizer {
    store: Arc<dyn ObjectStore>,
    context: BuildContext,
    mapping: CategoryMapping,
    repo_root: PathBuf,
    diff_reference: String,
    assets_root: String,
}

impl AssetSynchronizer {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        context: BuildContext,
        config: &PublishConfig,
        repo_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            context,
            mapping: CategoryMapping::default(),
            repo_root: repo_root.into(),
            diff_reference: config.diff_reference.clone(),
            assets_root: config.assets_root.clone(),
        }
    }

    pub fn with_mapping(mut self, mapping: CategoryMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Computes the change set for `mode` and applies it.
    pub async fn synchronize(&self, mode: SyncMode) -> PublishResult<SyncReport> {
        info!(
            "syncing static assets to {}/{} ({mode:?})",
            self.context.bucket,
            self.context.target_prefix()
        );

        let changes = match mode {
            SyncMode::Full => changes::enumerate_all(&self.repo_root, &self.mapping)?,
            SyncMode::Incremental => {
                changes::git_diff_changes(&self.repo_root, &self.diff_reference, &self.assets_root)
                    .await
            }
        };
        debug!("{} entries in change set", changes.len());

        self.apply(&changes).await
    }

    /// Applies `changes` in order. The first storage failure aborts the run.
    ///
    /// Entries are handled independently: a path deleted and re-added in the
    /// same set gets both calls, in set order.
    pub async fn apply(&self, changes: &[FileChange]) -> PublishResult<SyncReport> {
        let mut report = SyncReport::default();

        for change in changes {
            let Some(key) = self.mapping.remote_key(&self.context, &change.path) else {
                debug!("ignoring {} outside mapped roots", change.path);
                report.unmapped += 1;
                continue;
            };

            match change.status {
                ChangeStatus::Deleted => {
                    self.store
                        .delete_object(&self.context.bucket, key.as_str())
                        .await?;
                    info!("deleted {key}");
                    report.deleted += 1;
                }
                ChangeStatus::Added | ChangeStatus::Modified => {
                    if self.upload(&change.path, &key).await? {
                        report.uploaded += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
            }
        }

        info!(
            "sync finished: {} uploaded, {} deleted, {} skipped, {} unmapped",
            report.uploaded, report.deleted, report.skipped, report.unmapped
        );
        Ok(report)
    }

    /// Returns false when the local file no longer exists.
    async fn upload(&self, local_path: &str, key: &RemoteObjectKey) -> PublishResult<bool> {
        let full_path = self.repo_root.join(local_path);
        let body = match tokio::fs::read(&full_path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("skipping {local_path}: no longer on disk");
                return Ok(false);
            }
            Err(e) => return Err(PublishError::io(full_path, e)),
        };

        let content_type = content_type_for(Path::new(local_path));
        self.store
            .put_object(&self.context.bucket, key.as_str(), body, content_type)
            .await?;

        info!("uploaded {local_path} to {key} with content type {content_type}");
        Ok(true)
    }
}

/// MIME type from the file extension, `application/octet-stream` when unknown.
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
