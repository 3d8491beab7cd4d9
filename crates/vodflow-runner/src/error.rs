//! Runner error types.

use thiserror::Error;

pub type RunnerResult<T> = Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Client(#[from] vodflow_client::ClientError),

    #[error("Storage error: {0}")]
    Storage(#[from] vodflow_storage::StorageError),

    #[error("No delegated upload URL returned for asset {0}")]
    MissingSasUrl(String),
}

impl RunnerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
