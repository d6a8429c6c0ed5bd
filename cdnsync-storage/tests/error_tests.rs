use cdnsync_storage::StorageError;

#[test]
fn s3_error_display() {
    let err = StorageError::S3("bucket not found".into());
    assert_eq!(err.to_string(), "S3 operation failed: bucket not found");
}

#[test]
fn not_found_display() {
    let err = StorageError::NotFound("bucket other".into());
    assert_eq!(err.to_string(), "not found: bucket other");
}

#[test]
fn config_error_display() {
    let err = StorageError::Config("CDN_BUCKET_NAME is required".into());
    assert_eq!(err.to_string(), "invalid configuration: CDN_BUCKET_NAME is required");
}
