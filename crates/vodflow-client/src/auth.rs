//! Client-credentials token exchange.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Service-principal credentials and the tenant-scoped token endpoint.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Fully-formed token endpoint URL
    pub token_url: String,
    /// Client (application) id
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Audience the token is requested for
    pub resource: String,
}

/// Time-limited bearer credential returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Client for the token endpoint. Used once at startup; the resulting token
/// lives for the whole run.
pub struct TokenClient {
    http: Client,
}

impl TokenClient {
    pub fn new() -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self { http })
    }

    /// Exchange the configured credentials for a bearer token. Failure here
    /// aborts startup; the workflow never begins without a credential.
    pub async fn acquire(&self, config: &AuthConfig) -> ClientResult<AccessToken> {
        debug!("Requesting token from {}", config.token_url);

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("resource", config.resource.as_str()),
        ];

        let response = self.http.post(&config.token_url).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response".to_string());
            return Err(ClientError::auth(format!("{}: {}", status, body)));
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|e| ClientError::auth(format!("malformed token response: {}", e)))?;

        info!("Acquired platform credential");
        Ok(token)
    }
}
