//! Image URL rewriting for the framework's custom image loader.
//!
//! Relative image references are served from the CDN with on-the-fly resizing
//! parameters. Framework-internal paths and absolute URLs pass through.

use crate::config::WebConfig;
use crate::error::WebResult;
use url::Url;

pub const DEFAULT_QUALITY: u32 = 75;

const RESIZE_PARAMS: [&str; 3] = ["format", "width", "quality"];

#[derive(Clone, Debug)]
pub struct ImageLoader {
    cdn_url: String,
    bucket_public_url: Option<String>,
}

impl ImageLoader {
    pub fn new(config: &WebConfig) -> Self {
        Self {
            cdn_url: config.cdn_url.clone(),
            bucket_public_url: config.bucket_public_url.clone(),
        }
    }

    /// URL the browser should fetch for `src` at `width` pixels.
    pub fn load(&self, src: &str, width: u32, quality: Option<u32>) -> WebResult<String> {
        if self.passes_through(src) {
            return Ok(src.to_string());
        }

        let mut url = Url::parse(&format!("{}{src}", self.cdn_url))?;
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !RESIZE_PARAMS.iter().any(|p| k == p))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let quality = quality.filter(|q| *q > 0).unwrap_or(DEFAULT_QUALITY);
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("format", "auto")
            .append_pair("width", &width.to_string())
            .append_pair("quality", &quality.to_string());

        Ok(url.into())
    }

    fn passes_through(&self, src: &str) -> bool {
        src.starts_with("/_next")
            || src.starts_with("http")
            || self
                .bucket_public_url
                .as_deref()
                .is_some_and(|base| src.starts_with(base))
    }
}
