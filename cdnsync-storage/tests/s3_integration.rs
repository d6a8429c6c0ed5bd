//! Integration tests for S3Storage against a local MinIO.
//!
//! Requires a MinIO on localhost:9000 with a `cdnsync-test` bucket; run with
//! `cargo test -- --ignored`.

use cdnsync_storage::{ObjectStore, S3Storage, StorageConfig};
use pretty_assertions::assert_eq;
use serial_test::serial;
use uuid::Uuid;

const BUCKET: &str = "cdnsync-test";

fn test_storage() -> S3Storage {
    S3Storage::new(&StorageConfig {
        bucket: BUCKET.into(),
        region: "us-east-1".into(),
        endpoint_url: Some("http://localhost:9000".into()),
        access_key_id: "cdnsync-test".into(),
        secret_access_key: "cdnsync-test-secret".into(),
    })
}

fn unique_prefix() -> String {
    format!("test-runs/{}", Uuid::new_v4())
}

#[tokio::test]
#[serial]
#[ignore = "requires MinIO"]
async fn put_list_delete_roundtrip() {
    let storage = test_storage();
    let prefix = unique_prefix();

    for name in ["a.json", "b.json", "c.json"] {
        storage
            .put_object(BUCKET, &format!("{prefix}/{name}"), b"{}".to_vec(), "application/json")
            .await
            .unwrap();
    }

    let page = storage.list_objects(BUCKET, &format!("{prefix}/"), 2).await.unwrap();
    assert_eq!(page.keys.len(), 2);
    assert!(page.is_truncated);

    storage.delete_objects(BUCKET, &page.keys).await.unwrap();
    storage
        .delete_object(BUCKET, &format!("{prefix}/c.json"))
        .await
        .unwrap();

    let page = storage.list_objects(BUCKET, &format!("{prefix}/"), 10).await.unwrap();
    assert!(page.is_empty());
    assert!(!page.is_truncated);
}

#[tokio::test]
#[serial]
#[ignore = "requires MinIO"]
async fn missing_bucket_fails() {
    let storage = test_storage();
    let result = storage
        .put_object("no-such-bucket-cdnsync", "k", b"x".to_vec(), "text/plain")
        .await;
    assert!(result.is_err());
}
