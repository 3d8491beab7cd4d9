//! Streaming locators, paths and endpoints.

use serde::{Deserialize, Serialize};

/// Clear (unencrypted) streaming policy applied to published locators.
pub const CLEAR_STREAMING_POLICY: &str = "Predefined_ClearStreamingOnly";

/// Name of the platform's default streaming endpoint, assumed running.
pub const DEFAULT_STREAMING_ENDPOINT: &str = "default";

/// Binding of an output asset to a streaming policy. Serves as both the
/// creation body and the response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLocator {
    pub asset_name: String,
    pub streaming_policy_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StreamingLocator {
    /// Locator over the given asset with the fixed clear policy.
    pub fn clear(asset_name: impl Into<String>) -> Self {
        Self {
            asset_name: asset_name.into(),
            streaming_policy_name: CLEAR_STREAMING_POLICY.to_string(),
            name: None,
        }
    }
}

/// One protocol's worth of paths under a locator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingPath {
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_protocol: Option<String>,
}

/// Paths resolved for a locator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingPaths {
    #[serde(default)]
    pub streaming_paths: Vec<StreamingPath>,
}

impl StreamingPaths {
    /// First path of each protocol entry; the one published as playable.
    pub fn primary_paths(&self) -> impl Iterator<Item = &str> {
        self.streaming_paths
            .iter()
            .filter_map(|p| p.paths.first().map(String::as_str))
    }
}

/// Streaming endpoint hosting the published paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingEndpoint {
    pub name: String,
    pub host_name: String,
}

/// Join an endpoint hostname and a locator path into a playable HTTPS URL.
/// Paths arrive with a leading slash; the join keeps exactly one.
pub fn playable_url(host_name: &str, path: &str) -> String {
    format!(
        "https://{}/{}",
        host_name.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
