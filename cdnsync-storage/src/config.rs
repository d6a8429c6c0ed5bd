//! Object storage configuration.

use crate::error::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "ap-southeast-1";
pub const DEFAULT_ENDPOINT_URL: &str = "https://s3.ap-southeast-1.amazonaws.com";

/// Connection settings for the CDN origin bucket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket the static assets are published to.
    pub bucket: String,

    /// Region for request signing.
    pub region: String,

    /// S3-compatible endpoint. Requests use path-style addressing against it.
    pub endpoint_url: Option<String>,

    pub access_key_id: String,

    #[serde(default, skip_serializing)]
    pub secret_access_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: Some(DEFAULT_ENDPOINT_URL.to_string()),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

impl StorageConfig {
    /// Reads configuration from the process environment.
    ///
    /// Required: `CDN_BUCKET_NAME`, `CDN_ACCESS_KEY_ID`, `CDN_SECRET_ACCESS_KEY`.
    /// Optional: `CDN_REGION`, `CDN_ENDPOINT_URL`.
    pub fn from_env() -> StorageResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> StorageResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| StorageError::Config(format!("{name} is required")))
        };

        Ok(Self {
            bucket: require("CDN_BUCKET_NAME")?,
            region: get("CDN_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: Some(
                get("CDN_ENDPOINT_URL").unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string()),
            ),
            access_key_id: require("CDN_ACCESS_KEY_ID")?,
            secret_access_key: require("CDN_SECRET_ACCESS_KEY")?,
        })
    }
}
