//! Web helper configuration.

use crate::error::{WebError, WebResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "en";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WebConfig {
    /// Public base URL of the CDN (e.g. "https://cdn.example.com/dev/<build>").
    pub cdn_url: String,

    /// Public URL of the bucket itself. Image references under it are served as is.
    pub bucket_public_url: Option<String>,

    /// Locale served when the requested one is unavailable.
    pub default_locale: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cdn_url: String::new(),
            bucket_public_url: None,
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl WebConfig {
    /// Reads `NEXT_PUBLIC_CDN_URL` (required) and `NEXT_PUBLIC_BUCKET_PUBLIC_URL`.
    pub fn from_env() -> WebResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> WebResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cdn_url = get("NEXT_PUBLIC_CDN_URL")
            .ok_or_else(|| WebError::Config("NEXT_PUBLIC_CDN_URL is required".to_string()))?;

        Ok(Self {
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
            bucket_public_url: get("NEXT_PUBLIC_BUCKET_PUBLIC_URL"),
            default_locale: DEFAULT_LOCALE.to_string(),
        })
    }
}
