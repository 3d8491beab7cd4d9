//! Authenticated REST client for the media-processing platform.
//!
//! Exposes the client-credentials token exchange and a thin, immutable
//! client over the platform's transform/asset/job/streaming surface. One
//! client handle is constructed per run and reused for every call; no call
//! is retried automatically.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{AccessToken, AuthConfig, TokenClient};
pub use client::{PlatformClient, PlatformConfig};
pub use error::{ClientError, ClientResult};
