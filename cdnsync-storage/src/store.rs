//! Backend-agnostic object storage interface.

use crate::error::StorageResult;
use async_trait::async_trait;

/// One page of a prefix listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPage {
    pub keys: Vec<String>,
    /// More keys exist under the prefix beyond this page.
    pub is_truncated: bool,
}

impl ListPage {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Put/delete/list primitives against a bucket.
///
/// Implementations do not retry: a failed call is returned to the caller as is.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `body` at `key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Removes a single object. Removing a missing key succeeds.
    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()>;

    /// Removes all `keys` in one batch call.
    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StorageResult<()>;

    /// Lists at most `max_keys` keys under `prefix`, in key order.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: i32,
    ) -> StorageResult<ListPage>;
}
