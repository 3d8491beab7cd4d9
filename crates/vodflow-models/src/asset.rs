//! Storage assets: named containers holding input or output media.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Asset as reported by the platform. Identity is the caller-generated name,
/// made unique per run via the uniqueness token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

/// Access granted by a delegated container URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SasPermissions {
    Read,
    ReadWrite,
}

/// Body for listing delegated container URLs on an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SasRequest {
    pub permissions: SasPermissions,
    pub expiry_time: DateTime<Utc>,
}

impl SasRequest {
    /// Read-write access expiring the given number of hours from now.
    /// The upload workflow uses a one-hour window.
    pub fn read_write(valid_hours: i64) -> Self {
        Self {
            permissions: SasPermissions::ReadWrite,
            expiry_time: Utc::now() + Duration::hours(valid_hours),
        }
    }
}

/// Delegated container URLs returned for an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetContainerSas {
    #[serde(default)]
    pub asset_container_sas_urls: Vec<String>,
}

impl AssetContainerSas {
    /// The first usable upload URL, if the platform returned any.
    pub fn first_url(&self) -> Option<&str> {
        self.asset_container_sas_urls.first().map(String::as_str)
    }
}
