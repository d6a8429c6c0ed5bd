//! Object storage client for cdnsync.
//!
//! Wraps bucket credentials, endpoint and region into a reusable handle with
//! put, delete and list primitives:
//! - [`ObjectStore`] trait shared by every backend
//! - [`S3Storage`] backed by the AWS SDK (works against any S3-compatible endpoint)
//! - [`MemoryStore`] keeping objects in process, recording every call

pub mod config;
pub mod error;
pub mod memory;
pub mod s3;
pub mod store;

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use memory::{MemoryStore, StoreCall};
pub use s3::S3Storage;
pub use store::{ListPage, ObjectStore};
