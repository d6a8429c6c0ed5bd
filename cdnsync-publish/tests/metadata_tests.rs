use cdnsync_publish::{BuildId, BuildMetadataFile, PublishError};
use pretty_assertions::assert_eq;
use std::fs;

#[tokio::test]
async fn reads_recorded_build_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, r#"{"name":"web","buildID":"abc-123"}"#).unwrap();

    let id = BuildMetadataFile::new(&path).read_build_id().await.unwrap();
    assert_eq!(id, BuildId::from("abc-123"));
}

#[tokio::test]
async fn missing_field_is_missing_build_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, r#"{"name":"web"}"#).unwrap();

    let metadata = BuildMetadataFile::new(&path);
    let err = metadata.read_build_id().await.unwrap_err();
    assert!(matches!(err, PublishError::MissingBuildId(p) if p == metadata.path()));
}

#[tokio::test]
async fn non_string_field_is_metadata_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, r#"{"buildID":42}"#).unwrap();

    let err = BuildMetadataFile::new(&path).read_build_id().await.unwrap_err();
    assert!(matches!(err, PublishError::Metadata(_)));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BuildMetadataFile::new(dir.path().join("nope.json"))
        .read_build_id()
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Io { .. }));
}

#[tokio::test]
async fn invalid_json_is_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, "{ not json").unwrap();

    let err = BuildMetadataFile::new(&path).read_build_id().await.unwrap_err();
    assert!(matches!(err, PublishError::Serialization(_)));
}

#[tokio::test]
async fn write_preserves_field_order_and_indents_two_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package.json");
    fs::write(
        &path,
        r#"{"name":"web","version":"0.1.0","buildID":"old","scripts":{"build":"next build"}}"#,
    )
    .unwrap();

    BuildMetadataFile::new(&path)
        .write_build_id(&BuildId::from("new"))
        .await
        .unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "{\n  \"name\": \"web\",\n  \"version\": \"0.1.0\",\n  \"buildID\": \"new\",\n  \"scripts\": {\n    \"build\": \"next build\"\n  }\n}\n"
    );
}

#[tokio::test]
async fn write_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = BuildMetadataFile::new(dir.path().join("build.json"));

    metadata.write_build_id(&BuildId::from("fresh")).await.unwrap();
    assert_eq!(metadata.read_build_id().await.unwrap(), BuildId::from("fresh"));
}

#[test]
fn generated_ids_are_unique() {
    let a = BuildId::generate();
    let b = BuildId::generate();
    assert_ne!(a, b);
    assert_eq!(a.as_str().len(), 36);
}
