//! Shared data models for the vodflow encode-and-publish workflow.
//!
//! This crate provides Serde-serializable types for:
//! - Encoding transforms and presets
//! - Storage assets and delegated container URLs
//! - Jobs, job inputs and the job state machine
//! - Streaming locators, paths and endpoints
//! - Per-run resource-name derivation

pub mod asset;
pub mod job;
pub mod names;
pub mod streaming;
pub mod transform;

// Re-export common types
pub use asset::{Asset, AssetContainerSas, SasPermissions, SasRequest};
pub use job::{Job, JobError, JobInput, JobOutput, JobRequest, JobState, ParseJobStateError};
pub use names::{new_uniqueness_token, RunNames};
pub use streaming::{
    playable_url, StreamingEndpoint, StreamingLocator, StreamingPath, StreamingPaths,
    CLEAR_STREAMING_POLICY, DEFAULT_STREAMING_ENDPOINT,
};
pub use transform::{Preset, Transform, TransformOutput, TransformRequest};
