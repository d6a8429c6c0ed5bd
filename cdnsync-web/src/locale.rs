//! Translation bundle resolution.
//!
//! A request asks for a locale (usually from the `locale` cookie). The bundle
//! is fetched from `{cdn_url}/locales/{locale}.json`; when that fails the
//! default locale's bundle is fetched once instead. Nothing is cached here.

use crate::config::WebConfig;
use crate::error::{WebError, WebResult};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const LOCALE_COOKIE: &str = "locale";

/// Translation keys to strings or nested groups.
pub type Messages = Map<String, Value>;

/// The bundle a request ends up with and the locale it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedMessages {
    pub locale: String,
    pub messages: Messages,
}

/// Fetches locale bundles from the CDN.
#[derive(Clone, Debug)]
pub struct LocaleResolver {
    client: Client,
    base_url: String,
    default_locale: String,
}

impl LocaleResolver {
    pub fn new(config: &WebConfig) -> WebResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &WebConfig) -> Self {
        Self {
            client,
            base_url: config.cdn_url.trim_end_matches('/').to_string(),
            default_locale: config.default_locale.clone(),
        }
    }

    /// Resolves `requested` (default locale when absent or blank) to a bundle.
    ///
    /// The requested bundle is tried first, then the default one exactly once,
    /// even when the requested locale is the default. The second failure is
    /// returned as the error.
    pub async fn resolve_messages(&self, requested: Option<&str>) -> WebResult<ResolvedMessages> {
        let requested = requested
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.default_locale.as_str());

        if is_locale_tag(requested) {
            match self.fetch_bundle(requested).await {
                Ok(messages) => {
                    return Ok(ResolvedMessages {
                        locale: requested.to_string(),
                        messages,
                    });
                }
                Err(e) => warn!(
                    "failed to fetch locale {requested}, falling back to {}: {e}",
                    self.default_locale
                ),
            }
        } else {
            warn!(
                "ignoring malformed locale {requested:?}, using {}",
                self.default_locale
            );
        }

        let messages = self.fetch_bundle(&self.default_locale).await?;
        Ok(ResolvedMessages {
            locale: self.default_locale.clone(),
            messages,
        })
    }

    async fn fetch_bundle(&self, locale: &str) -> WebResult<Messages> {
        let url = format!("{}/locales/{locale}.json", self.base_url);
        debug!("fetching locale bundle {url}");

        let resp = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WebError::Status {
                url,
                status: status.as_u16(),
            });
        }

        match resp.json::<Value>().await? {
            Value::Object(messages) => Ok(messages),
            other => Err(WebError::InvalidBundle {
                url,
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

/// Value of the `locale` cookie in a `Cookie` request header.
pub fn locale_from_cookie_header(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() != LOCALE_COOKIE {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Plain tags like `en`, `pt-BR` or `zh_Hant`. Anything else never reaches a URL.
fn is_locale_tag(locale: &str) -> bool {
    locale.len() <= 35
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
