//! Build identifiers and the context a publish run operates in.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque token grouping every object published for one build.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    /// Mints a fresh identifier for the next build.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BuildId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BuildId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the objects of one build live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildContext {
    pub bucket: String,
    pub prefix: String,
    pub build_id: BuildId,
}

impl BuildContext {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>, build_id: BuildId) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            build_id,
        }
    }

    /// `{prefix}/{build_id}`, the root of every key of this build.
    pub fn target_prefix(&self) -> String {
        build_prefix(&self.prefix, &self.build_id)
    }
}

pub(crate) fn build_prefix(prefix: &str, build_id: &BuildId) -> String {
    if prefix.is_empty() {
        build_id.to_string()
    } else {
        format!("{prefix}/{build_id}")
    }
}
