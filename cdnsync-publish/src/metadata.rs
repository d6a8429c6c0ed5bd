//! Persistence of the current build id.
//!
//! The id lives in the `buildID` field of the application's package
//! manifest, next to fields this crate does not own. Only this adapter reads
//! or writes that file.

use crate::build::BuildId;
use crate::error::{PublishError, PublishResult};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

pub const BUILD_ID_FIELD: &str = "buildID";

/// Build metadata stored as a JSON document on disk.
#[derive(Clone, Debug)]
pub struct BuildMetadataFile {
    path: PathBuf,
}

impl BuildMetadataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the build id currently recorded.
    pub async fn read_build_id(&self) -> PublishResult<BuildId> {
        let document = self.load().await?;
        match document.get(BUILD_ID_FIELD) {
            Some(Value::String(id)) if !id.is_empty() => Ok(BuildId::from(id.as_str())),
            Some(Value::String(_)) | None => Err(PublishError::MissingBuildId(self.path.clone())),
            Some(other) => Err(PublishError::Metadata(format!(
                "{BUILD_ID_FIELD} in {} must be a string, found {other}",
                self.path.display()
            ))),
        }
    }

    /// Overwrites the recorded build id, keeping every other field.
    ///
    /// A missing file is created holding only the build id.
    pub async fn write_build_id(&self, build_id: &BuildId) -> PublishResult<()> {
        let mut document = match tokio::fs::try_exists(&self.path).await {
            Ok(true) => self.load().await?,
            Ok(false) => Map::new(),
            Err(e) => return Err(PublishError::io(&self.path, e)),
        };
        document.insert(
            BUILD_ID_FIELD.to_string(),
            Value::String(build_id.to_string()),
        );

        let mut rendered = serde_json::to_string_pretty(&Value::Object(document))?;
        rendered.push('\n');
        tokio::fs::write(&self.path, rendered)
            .await
            .map_err(|e| PublishError::io(&self.path, e))?;

        info!("updated {BUILD_ID_FIELD} in {} to {build_id}", self.path.display());
        Ok(())
    }

    async fn load(&self) -> PublishResult<Map<String, Value>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PublishError::io(&self.path, e))?;
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(PublishError::Metadata(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }
}
