//! In-process object store.
//!
//! Keeps objects in a sorted map for a single bucket and records every call
//! made against it, so publish flows can be checked without a network.

use crate::error::{StorageError, StorageResult};
use crate::store::{ListPage, ObjectStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// A call observed by [`MemoryStore`], in issue order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCall {
    Put { key: String, content_type: String, size: usize },
    Delete { key: String },
    DeleteBatch { keys: Vec<String> },
    List { prefix: String, max_keys: i32 },
}

#[derive(Clone, Debug)]
struct StoredObject {
    body: Vec<u8>,
    content_type: String,
}

#[derive(Default)]
struct State {
    objects: BTreeMap<String, StoredObject>,
    calls: Vec<StoreCall>,
    failing_keys: HashSet<String>,
}

/// Single-bucket object store held in memory.
pub struct MemoryStore {
    bucket: String,
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Seeds an object without recording a call.
    pub fn insert(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.state().objects.insert(
            key.into(),
            StoredObject {
                body: body.into(),
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    /// Makes every later put or delete of `key` fail.
    pub fn fail_on(&self, key: impl Into<String>) {
        self.state().failing_keys.insert(key.into());
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state().calls.clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.state().objects.keys().cloned().collect()
    }

    pub fn body(&self, key: &str) -> Option<Vec<u8>> {
        self.state().objects.get(key).map(|o| o.body.clone())
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.state().objects.get(key).map(|o| o.content_type.clone())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_bucket(&self, bucket: &str) -> StorageResult<()> {
        if bucket == self.bucket {
            Ok(())
        } else {
            Err(StorageError::NotFound(format!("bucket {bucket}")))
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        self.check_bucket(bucket)?;
        let mut state = self.state();
        state.calls.push(StoreCall::Put {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: body.len(),
        });
        if state.failing_keys.contains(key) {
            return Err(StorageError::S3(format!("upload failed for {key}: injected failure")));
        }
        state.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.check_bucket(bucket)?;
        let mut state = self.state();
        state.calls.push(StoreCall::Delete { key: key.to_string() });
        if state.failing_keys.contains(key) {
            return Err(StorageError::S3(format!("delete failed for {key}: injected failure")));
        }
        state.objects.remove(key);
        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        self.check_bucket(bucket)?;
        if keys.is_empty() {
            return Ok(());
        }
        let mut state = self.state();
        state.calls.push(StoreCall::DeleteBatch { keys: keys.to_vec() });
        if let Some(key) = keys.iter().find(|k| state.failing_keys.contains(*k)) {
            return Err(StorageError::S3(format!(
                "batch delete rejected {key}: injected failure"
            )));
        }
        for key in keys {
            state.objects.remove(key);
        }
        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: i32,
    ) -> StorageResult<ListPage> {
        self.check_bucket(bucket)?;
        let mut state = self.state();
        state.calls.push(StoreCall::List {
            prefix: prefix.to_string(),
            max_keys,
        });

        let limit = usize::try_from(max_keys.max(1)).unwrap_or(1);
        let mut matching = state
            .objects
            .range(prefix.to_string()..)
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix));

        let keys: Vec<String> = matching.by_ref().take(limit).cloned().collect();
        let is_truncated = matching.next().is_some();

        Ok(ListPage { keys, is_truncated })
    }
}
