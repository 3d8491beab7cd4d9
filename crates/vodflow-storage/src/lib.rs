//! Local-file upload to delegated storage container URLs.
//!
//! The platform hands out time-limited, query-string-credentialed container
//! URLs; this crate uploads a local file's bytes to such a container under a
//! collision-resistant blob name. Account-level storage credentials never
//! appear here.

pub mod error;
pub mod uploader;

pub use error::{StorageError, StorageResult};
pub use uploader::BlobUploader;
