//! Blob upload over a delegated container URL.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{StorageError, StorageResult};

/// Uploads local files into delegated storage containers.
pub struct BlobUploader {
    http: Client,
}

impl BlobUploader {
    pub fn new() -> StorageResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| StorageError::Build(e.to_string()))?;
        Ok(Self { http })
    }

    /// Derive a collision-resistant blob name for a local file: the original
    /// filename plus a small random numeric suffix. The containing asset name
    /// already carries the per-run uniqueness token.
    pub fn blob_name_for(path: &Path) -> String {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("input");
        let suffix: u32 = rand::rng().random_range(0..100);
        format!("{}{}", file_name, suffix)
    }

    /// Upload the file's bytes to `{container}/{blob_name}` keeping the
    /// URL's query-string credential intact. Failure is fatal for the run;
    /// there is no partial-success state to recover into.
    pub async fn upload_file(
        &self,
        container_sas_url: &str,
        blob_name: &str,
        path: impl AsRef<Path>,
    ) -> StorageResult<()> {
        let path = path.as_ref();

        let mut url = Url::parse(container_sas_url)
            .map_err(|e| StorageError::invalid_url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StorageError::invalid_url(container_sas_url))?
            .push(blob_name);

        debug!("Uploading {} to {}", path.display(), url.path());
        let bytes = tokio::fs::read(path).await?;
        let byte_count = bytes.len();

        let response = self
            .http
            .put(url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response".to_string());
            return Err(StorageError::upload_failed(format!("{}: {}", status, body)));
        }

        info!(
            "Uploaded {} ({} bytes) as blob {}",
            path.display(),
            byte_count,
            blob_name
        );
        Ok(())
    }
}
