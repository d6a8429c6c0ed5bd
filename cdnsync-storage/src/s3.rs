//! S3 put/delete/list operations against the CDN origin bucket.
//!
//! The client is built once from static credentials and reused for every
//! call of a run.

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::store::{ListPage, ObjectStore};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use tracing::debug;

/// S3 transport for publishing static assets.
#[derive(Clone, Debug)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = aws_credential_types::Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "cdnsync-static",
        );

        let mut config_builder = aws_sdk_s3::Config::builder()
            .region(aws_types::region::Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .behavior_version_latest();

        if let Some(ref endpoint) = config.endpoint_url {
            config_builder = config_builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }

        Self {
            client: S3Client::from_conf(config_builder.build()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                StorageError::S3(format!("upload failed for {key}: {}", DisplayErrorContext(&e)))
            })?;

        debug!("uploaded {size} bytes to s3://{bucket}/{key}");
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                StorageError::S3(format!("delete failed for {key}: {}", DisplayErrorContext(&e)))
            })?;

        debug!("deleted s3://{bucket}/{key}");
        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects = keys
            .iter()
            .map(|key| {
                ObjectIdentifier::builder()
                    .key(key)
                    .build()
                    .map_err(|e| StorageError::S3(format!("invalid object identifier {key}: {e}")))
            })
            .collect::<StorageResult<Vec<_>>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| StorageError::S3(format!("invalid delete request: {e}")))?;

        let resp = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                StorageError::S3(format!(
                    "batch delete of {} keys failed: {}",
                    keys.len(),
                    DisplayErrorContext(&e)
                ))
            })?;

        // The batch call succeeds at the HTTP level even when single keys fail.
        if let Some(first) = resp.errors().first() {
            return Err(StorageError::S3(format!(
                "batch delete rejected {} of {} keys, first {}: {}",
                resp.errors().len(),
                keys.len(),
                first.key().unwrap_or("<unknown>"),
                first.message().unwrap_or("no message"),
            )));
        }

        debug!("deleted {} objects from s3://{bucket}", keys.len());
        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: i32,
    ) -> StorageResult<ListPage> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .max_keys(max_keys)
            .send()
            .await
            .map_err(|e| {
                StorageError::S3(format!(
                    "list failed for prefix {prefix}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let keys = resp
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(|k| k.to_string()))
            .collect();

        Ok(ListPage {
            keys,
            is_truncated: resp.is_truncated().unwrap_or(false),
        })
    }
}
