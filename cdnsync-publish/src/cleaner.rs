//! Pre-build cleanup of the current build prefix.
//!
//! Lists the objects under `{prefix}/{build_id}/`, batch-deletes each page
//! and repeats while the listing reports more keys. Afterwards a fresh build
//! id replaces the old one in build metadata.

use crate::build::{BuildId, build_prefix};
use crate::error::{PublishError, PublishResult};
use crate::metadata::BuildMetadataFile;
use cdnsync_storage::ObjectStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Deletes everything a previous run published for a build id.
pub struct StaleBuildCleaner {
    store: Arc<dyn ObjectStore>,
    page_size: i32,
}

impl StaleBuildCleaner {
    pub fn new(store: Arc<dyn ObjectStore>, page_size: i32) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
        }
    }

    /// Removes every object of `build_id` and returns how many were deleted.
    ///
    /// Deleted keys drop out of the listing, so every round lists from the
    /// start of the prefix again.
    pub async fn clean_previous_build(
        &self,
        bucket: &str,
        prefix: &str,
        build_id: &BuildId,
    ) -> PublishResult<usize> {
        let folder = format!("{}/", build_prefix(prefix, build_id));
        let mut deleted = 0;

        loop {
            let page = self
                .store
                .list_objects(bucket, &folder, self.page_size)
                .await?;

            if page.is_empty() {
                if deleted == 0 {
                    info!("no objects found under {folder}");
                }
                break;
            }

            self.store.delete_objects(bucket, &page.keys).await?;
            deleted += page.keys.len();
            info!("deleted {} objects from {folder}", page.keys.len());

            if !page.is_truncated {
                break;
            }
        }

        Ok(deleted)
    }

    /// Cleans the build recorded in `metadata`, then records a new build id.
    ///
    /// Metadata without a build id has nothing to clean.
    pub async fn rotate_build(
        &self,
        bucket: &str,
        prefix: &str,
        metadata: &BuildMetadataFile,
    ) -> PublishResult<BuildId> {
        match metadata.read_build_id().await {
            Ok(current) => {
                self.clean_previous_build(bucket, prefix, &current).await?;
            }
            Err(PublishError::MissingBuildId(path)) => {
                warn!("no build id in {}, nothing to clean", path.display());
            }
            Err(e) => return Err(e),
        }

        let next = BuildId::generate();
        metadata.write_build_id(&next).await?;
        Ok(next)
    }
}
