//! Platform REST client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use vodflow_models::{
    Asset, AssetContainerSas, Job, JobRequest, SasRequest, StreamingEndpoint, StreamingLocator,
    StreamingPaths, Transform, TransformRequest,
};

use crate::auth::AccessToken;
use crate::error::{ClientError, ClientResult};

/// Addressing for one media account on the platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Management endpoint base URL
    pub endpoint: String,
    /// Subscription id
    pub subscription_id: String,
    /// Resource group holding the account
    pub resource_group: String,
    /// Media account name
    pub account_name: String,
    /// API version sent with every call
    pub api_version: String,
}

impl PlatformConfig {
    fn account_path(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/mediaServices/{}",
            self.subscription_id, self.resource_group, self.account_name
        )
    }
}

/// Authenticated client over the platform's transform/asset/job/streaming
/// surface. Immutable after construction; shared by every call in a run.
pub struct PlatformClient {
    http: Client,
    config: PlatformConfig,
    bearer: String,
}

impl PlatformClient {
    pub fn new(config: PlatformConfig, token: &AccessToken) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            config: PlatformConfig {
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                ..config
            },
            bearer: token.access_token.clone(),
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}{}{}",
            self.config.endpoint,
            self.config.account_path(),
            suffix
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.bearer)
            .query(&[("api-version", self.config.api_version.as_str())])
    }

    async fn expect_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response".to_string());
            return Err(ClientError::Api { status, body });
        }
        Ok(response.json().await?)
    }

    async fn expect_ok(&self, builder: RequestBuilder) -> ClientResult<()> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response".to_string());
            return Err(ClientError::Api { status, body });
        }
        Ok(())
    }

    /// Look up a transform by name; absent transforms come back as `None`
    /// rather than an error so callers can create-if-absent.
    pub async fn get_transform(&self, name: &str) -> ClientResult<Option<Transform>> {
        let url = self.url(&format!("/transforms/{}", name));
        debug!("GET {}", url);

        let response = self.authorized(self.http.get(&url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response".to_string());
            return Err(ClientError::Api { status, body });
        }
        Ok(Some(response.json().await?))
    }

    /// Create or update a transform with the given preset outputs.
    pub async fn create_transform(
        &self,
        name: &str,
        request: &TransformRequest,
    ) -> ClientResult<Transform> {
        let url = self.url(&format!("/transforms/{}", name));
        debug!("PUT {}", url);
        self.expect_json(self.http.put(&url).json(request)).await
    }

    /// Create or update an asset (empty body; the platform allocates the
    /// backing container).
    pub async fn create_asset(&self, name: &str) -> ClientResult<Asset> {
        let url = self.url(&format!("/assets/{}", name));
        debug!("PUT {}", url);
        self.expect_json(self.http.put(&url).json(&EmptyBody {}))
            .await
    }

    pub async fn delete_asset(&self, name: &str) -> ClientResult<()> {
        let url = self.url(&format!("/assets/{}", name));
        debug!("DELETE {}", url);
        self.expect_ok(self.http.delete(&url)).await
    }

    /// List time-limited delegated container URLs for an asset.
    pub async fn list_container_sas(
        &self,
        asset_name: &str,
        request: &SasRequest,
    ) -> ClientResult<AssetContainerSas> {
        let url = self.url(&format!("/assets/{}/listContainerSas", asset_name));
        debug!("POST {}", url);
        self.expect_json(self.http.post(&url).json(request)).await
    }

    /// Create a job under a transform. Returns the job as initially
    /// accepted; completion is observed by polling `get_job`.
    pub async fn create_job(
        &self,
        transform_name: &str,
        job_name: &str,
        request: &JobRequest,
    ) -> ClientResult<Job> {
        let url = self.url(&format!("/transforms/{}/jobs/{}", transform_name, job_name));
        debug!("PUT {}", url);
        self.expect_json(self.http.put(&url).json(request)).await
    }

    pub async fn get_job(&self, transform_name: &str, job_name: &str) -> ClientResult<Job> {
        let url = self.url(&format!("/transforms/{}/jobs/{}", transform_name, job_name));
        self.expect_json(self.http.get(&url)).await
    }

    pub async fn delete_job(&self, transform_name: &str, job_name: &str) -> ClientResult<()> {
        let url = self.url(&format!("/transforms/{}/jobs/{}", transform_name, job_name));
        debug!("DELETE {}", url);
        self.expect_ok(self.http.delete(&url)).await
    }

    /// Create a streaming locator binding an asset to a streaming policy.
    pub async fn create_streaming_locator(
        &self,
        name: &str,
        request: &StreamingLocator,
    ) -> ClientResult<StreamingLocator> {
        let url = self.url(&format!("/streamingLocators/{}", name));
        debug!("PUT {}", url);
        self.expect_json(self.http.put(&url).json(request)).await
    }

    /// Resolve a locator to its streaming paths.
    pub async fn list_streaming_paths(&self, locator_name: &str) -> ClientResult<StreamingPaths> {
        let url = self.url(&format!("/streamingLocators/{}/listPaths", locator_name));
        debug!("POST {}", url);
        self.expect_json(self.http.post(&url).json(&EmptyBody {}))
            .await
    }

    /// Fetch a streaming endpoint; the workflow only reads its hostname.
    pub async fn get_streaming_endpoint(&self, name: &str) -> ClientResult<StreamingEndpoint> {
        let url = self.url(&format!("/streamingEndpoints/{}", name));
        debug!("GET {}", url);
        self.expect_json(self.http.get(&url)).await
    }
}

/// Create-or-update calls without parameters still send a JSON body.
#[derive(Serialize)]
struct EmptyBody {}

#[cfg(test)]
mod tests {
    use super::*;
    use vodflow_models::JobInput;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCOUNT_PATH: &str = "/subscriptions/sub1/resourceGroups/rg1/mediaServices/acct1";

    fn test_client(server: &MockServer) -> PlatformClient {
        let token = AccessToken {
            access_token: "tok-123".to_string(),
            expires_in: None,
        };
        PlatformClient::new(
            PlatformConfig {
                endpoint: server.uri(),
                subscription_id: "sub1".to_string(),
                resource_group: "rg1".to_string(),
                account_name: "acct1".to_string(),
                api_version: "2023-01-01".to_string(),
            },
            &token,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_transform_maps_missing_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/transforms/encode", ACCOUNT_PATH)))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let transform = test_client(&server).get_transform("encode").await.unwrap();
        assert!(transform.is_none());
    }

    #[tokio::test]
    async fn test_get_transform_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/transforms/encode", ACCOUNT_PATH)))
            .and(query_param("api-version", "2023-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "encode",
                "outputs": [{"preset": {"type": "BuiltInStandardEncoder", "presetName": "AdaptiveStreaming"}}]
            })))
            .mount(&server)
            .await;

        let transform = test_client(&server)
            .get_transform("encode")
            .await
            .unwrap()
            .expect("transform");
        assert_eq!(transform.name, "encode");
        assert_eq!(transform.outputs.len(), 1);
    }

    #[tokio::test]
    async fn test_create_job_sends_tagged_input() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("{}/transforms/encode/jobs/job-1", ACCOUNT_PATH)))
            .and(body_partial_json(serde_json::json!({
                "input": {"type": "Http", "files": ["https://example.com/in.mp4"]},
                "outputs": [{"assetName": "out-1"}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "name": "job-1",
                "state": "Queued",
                "input": {"type": "Http", "files": ["https://example.com/in.mp4"]},
                "outputs": [{"assetName": "out-1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = JobRequest::new(JobInput::http("https://example.com/in.mp4"), "out-1");
        let job = test_client(&server)
            .create_job("encode", "job-1", &request)
            .await
            .unwrap();
        assert_eq!(job.name, "job-1");
        assert_eq!(job.state, vodflow_models::JobState::Queued);
    }

    #[tokio::test]
    async fn test_failure_status_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid preset"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .create_transform(
                "encode",
                &TransformRequest::single("westus2", vodflow_models::Preset::adaptive_streaming()),
            )
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "invalid preset");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_list_container_sas() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!(
                "{}/assets/in-1/listContainerSas",
                ACCOUNT_PATH
            )))
            .and(body_partial_json(serde_json::json!({
                "permissions": "ReadWrite"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "assetContainerSasUrls": ["https://store.example.com/c1?sig=abc"]
            })))
            .mount(&server)
            .await;

        let sas = test_client(&server)
            .list_container_sas("in-1", &SasRequest::read_write(1))
            .await
            .unwrap();
        assert_eq!(sas.first_url(), Some("https://store.example.com/c1?sig=abc"));
    }
}
