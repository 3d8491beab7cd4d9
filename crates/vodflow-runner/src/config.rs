//! Runner configuration.

use std::path::PathBuf;
use std::time::Duration;

use vodflow_client::{AuthConfig, PlatformConfig};

use crate::error::{RunnerError, RunnerResult};
use crate::poller::PollOptions;

/// Where the job input comes from. Exactly one source per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Local file, uploaded into a fresh input asset before submission
    LocalFile(PathBuf),
    /// Remote URL the platform pulls directly
    RemoteUrl(String),
}

/// Full configuration for one run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Platform management endpoint
    pub endpoint: String,
    /// Auth endpoint base (tenant-less)
    pub auth_endpoint: String,
    /// Tenant id
    pub tenant_id: String,
    /// Service-principal client id
    pub client_id: String,
    /// Service-principal client secret
    pub client_secret: String,
    /// Audience tokens are requested for
    pub auth_resource: String,
    /// Subscription id
    pub subscription_id: String,
    /// Resource group holding the media account
    pub resource_group: String,
    /// Media account name
    pub account_name: String,
    /// Region the transform is created in
    pub location: String,
    /// Durable encoding transform name, reused across runs
    pub transform_name: String,
    /// Built-in preset the transform encodes with
    pub preset_name: String,
    /// Prefix for all per-run resource names
    pub name_prefix: String,
    /// Local input file; mutually exclusive with `input_url`
    pub input_file: Option<PathBuf>,
    /// Remote input URL; mutually exclusive with `input_file`
    pub input_url: Option<String>,
    /// Delay between job status polls
    pub poll_interval: Duration,
    /// Wall-clock bound on the polling phase
    pub job_deadline: Duration,
    /// API version sent with every platform call
    pub api_version: String,
}

fn required(key: &str) -> RunnerResult<String> {
    std::env::var(key).map_err(|_| RunnerError::config(format!("{} not set", key)))
}

impl RunnerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> RunnerResult<Self> {
        let endpoint = required("VODFLOW_ENDPOINT")?;
        Ok(Self {
            auth_endpoint: required("VODFLOW_AUTH_ENDPOINT")?,
            tenant_id: required("VODFLOW_TENANT_ID")?,
            client_id: required("VODFLOW_CLIENT_ID")?,
            client_secret: required("VODFLOW_CLIENT_SECRET")?,
            auth_resource: std::env::var("VODFLOW_AUTH_RESOURCE")
                .unwrap_or_else(|_| endpoint.clone()),
            subscription_id: required("VODFLOW_SUBSCRIPTION_ID")?,
            resource_group: required("VODFLOW_RESOURCE_GROUP")?,
            account_name: required("VODFLOW_ACCOUNT_NAME")?,
            location: required("VODFLOW_LOCATION")?,
            transform_name: std::env::var("VODFLOW_TRANSFORM_NAME")
                .unwrap_or_else(|_| "AdaptiveStreamingTransform".to_string()),
            preset_name: std::env::var("VODFLOW_PRESET_NAME")
                .unwrap_or_else(|_| "AdaptiveStreaming".to_string()),
            name_prefix: std::env::var("VODFLOW_NAME_PREFIX")
                .unwrap_or_else(|_| "vodflow".to_string()),
            input_file: std::env::var("VODFLOW_INPUT_FILE").ok().map(PathBuf::from),
            input_url: std::env::var("VODFLOW_INPUT_URL").ok(),
            poll_interval: Duration::from_millis(
                std::env::var("VODFLOW_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15_000),
            ),
            job_deadline: Duration::from_secs(
                std::env::var("VODFLOW_JOB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            api_version: std::env::var("VODFLOW_API_VERSION")
                .unwrap_or_else(|_| "2023-01-01".to_string()),
            endpoint,
        })
    }

    /// The single configured input source. Supplying both a local file and a
    /// remote URL, or neither, is a configuration error.
    pub fn input_source(&self) -> RunnerResult<InputSource> {
        match (&self.input_file, &self.input_url) {
            (Some(file), None) => Ok(InputSource::LocalFile(file.clone())),
            (None, Some(url)) => Ok(InputSource::RemoteUrl(url.clone())),
            (Some(_), Some(_)) => Err(RunnerError::config(
                "VODFLOW_INPUT_FILE and VODFLOW_INPUT_URL are mutually exclusive",
            )),
            (None, None) => Err(RunnerError::config(
                "one of VODFLOW_INPUT_FILE or VODFLOW_INPUT_URL must be set",
            )),
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            token_url: format!(
                "{}/{}/oauth2/token",
                self.auth_endpoint.trim_end_matches('/'),
                self.tenant_id
            ),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            resource: self.auth_resource.clone(),
        }
    }

    pub fn platform(&self) -> PlatformConfig {
        PlatformConfig {
            endpoint: self.endpoint.clone(),
            subscription_id: self.subscription_id.clone(),
            resource_group: self.resource_group.clone(),
            account_name: self.account_name.clone(),
            api_version: self.api_version.clone(),
        }
    }

    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: self.poll_interval,
            deadline: self.job_deadline,
        }
    }
}
