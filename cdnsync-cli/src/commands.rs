//! Subcommand handlers. Configuration is read from the environment before
//! any storage or network I/O.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use cdnsync_publish::{
    AssetSynchronizer, BuildContext, BuildMetadataFile, PublishConfig, StaleBuildCleaner, SyncMode,
};
use cdnsync_storage::{ObjectStore, S3Storage, StorageConfig};
use cdnsync_web::{ImageLoader, LocaleResolver, WebConfig};
use tracing::info;

fn storage_from_env() -> Result<(StorageConfig, PublishConfig, Arc<dyn ObjectStore>)> {
    let storage_config = StorageConfig::from_env()?;
    let publish_config = PublishConfig::from_env()?;
    let store: Arc<dyn ObjectStore> = Arc::new(S3Storage::new(&storage_config));
    Ok((storage_config, publish_config, store))
}

pub async fn prebuild(metadata: &Path) -> Result<()> {
    let (storage_config, publish_config, store) = storage_from_env()?;
    let metadata = BuildMetadataFile::new(metadata);

    let cleaner = StaleBuildCleaner::new(store, publish_config.list_page_size);
    let next = cleaner
        .rotate_build(
            &storage_config.bucket,
            &publish_config.target_prefix,
            &metadata,
        )
        .await
        .with_context(|| format!("prebuild failed for {}", metadata.path().display()))?;

    info!("prebuild complete, next build id {next}");
    Ok(())
}

pub async fn upload(mode: Option<&str>, metadata: &Path, repo: &Path) -> Result<()> {
    let (storage_config, publish_config, store) = storage_from_env()?;
    let build_id = BuildMetadataFile::new(metadata)
        .read_build_id()
        .await
        .context("reading build id")?;

    let context = BuildContext::new(
        storage_config.bucket.clone(),
        publish_config.target_prefix.clone(),
        build_id,
    );
    let synchronizer = AssetSynchronizer::new(store, context, &publish_config, repo);

    let mode = SyncMode::from_arg(mode);
    info!("publishing build {}", synchronizer.context().build_id);
    let report = synchronizer
        .synchronize(mode)
        .await
        .context("uploading files")?;

    match mode {
        SyncMode::Full => info!("all {} files uploaded", report.uploaded),
        SyncMode::Incremental => info!(
            "files synced: {} uploaded, {} deleted",
            report.uploaded, report.deleted
        ),
    }
    Ok(())
}

pub async fn locale(requested: Option<&str>) -> Result<()> {
    let config = WebConfig::from_env()?;
    let resolved = LocaleResolver::new(&config)?
        .resolve_messages(requested)
        .await
        .context("resolving locale bundle")?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

pub fn image_url(src: &str, width: u32, quality: Option<u32>) -> Result<()> {
    let config = WebConfig::from_env()?;
    let url = ImageLoader::new(&config).load(src, width, quality)?;
    println!("{url}");
    Ok(())
}
