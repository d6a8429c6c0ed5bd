//! Publish configuration.

use crate::error::{PublishError, PublishResult};
use serde::{Deserialize, Serialize};

/// Settings shared by the synchronizer and the stale build cleaner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublishConfig {
    /// First path segment of every published key (e.g. "dev", "prod").
    pub target_prefix: String,

    /// Git revision incremental syncs diff the working tree against.
    pub diff_reference: String,

    /// Tracked directory holding the publishable assets.
    pub assets_root: String,

    /// Keys requested per listing page while cleaning a build prefix.
    pub list_page_size: i32,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            target_prefix: "dev".to_string(),
            diff_reference: "origin/main".to_string(),
            assets_root: "public".to_string(),
            list_page_size: 1000,
        }
    }
}

impl PublishConfig {
    /// Reads `CDN_TARGET_PATH_PREFIX`, `CDN_DIFF_REFERENCE` and
    /// `CDN_LIST_PAGE_SIZE` from the environment.
    pub fn from_env() -> PublishResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> PublishResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let list_page_size = match get("CDN_LIST_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<i32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(PublishError::Config(format!(
                        "CDN_LIST_PAGE_SIZE must be a positive integer, got {raw:?}"
                    )));
                }
            },
            None => defaults.list_page_size,
        };

        let diff_reference = get("CDN_DIFF_REFERENCE")
            .map(|r| r.trim().to_string())
            .unwrap_or(defaults.diff_reference);
        if diff_reference.starts_with('-') {
            return Err(PublishError::Config(format!(
                "CDN_DIFF_REFERENCE must name a git revision, got {diff_reference:?}"
            )));
        }

        Ok(Self {
            target_prefix: get("CDN_TARGET_PATH_PREFIX")
                .map(|p| p.trim_matches('/').to_string())
                .unwrap_or(defaults.target_prefix),
            diff_reference,
            assets_root: defaults.assets_root,
            list_page_size,
        })
    }
}
