//! Static asset publishing for cdnsync.
//!
//! Every object of a build lives under `{prefix}/{build_id}/{category}/...`.
//! This crate computes what to publish and mirrors it into object storage:
//! - [`CategoryMapping`] from local roots to remote categories
//! - [`changes`] from a git diff or a full directory walk
//! - [`AssetSynchronizer`] uploading and deleting per change
//! - [`StaleBuildCleaner`] wiping a build prefix and minting the next build id
//! - [`BuildMetadataFile`] persisting the current build id

pub mod build;
pub mod changes;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod mapping;
pub mod metadata;
pub mod sync;

pub use build::{BuildContext, BuildId};
pub use changes::{ChangeStatus, FileChange};
pub use cleaner::StaleBuildCleaner;
pub use config::PublishConfig;
pub use error::{PublishError, PublishResult};
pub use mapping::{Category, CategoryMapping, RemoteObjectKey};
pub use metadata::BuildMetadataFile;
pub use sync::{AssetSynchronizer, SyncMode, SyncReport};
