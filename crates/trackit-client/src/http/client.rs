/*
[INPUT]:  HTTP configuration (base URL, timeouts, bearer token)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::auth::TokenStore;
use crate::http::{Result, TrackitError};
use crate::types::ErrorResponse;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default address of a locally running TrackIt backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the TrackIt REST API.
///
/// Cloning is cheap; clones share the connection pool and the token store.
#[derive(Debug, Clone)]
pub struct TrackitClient {
    http_client: Client,
    base_url: Url,
    tokens: TokenStore,
}

impl TrackitClient {
    /// Create a new client against the default local backend
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and API base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            tokens: TokenStore::new(),
        })
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Shared bearer token storage
    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Build full URL for an endpoint such as `api/tasks`
    pub(crate) fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build URL for `endpoint/{segment}` with the segment percent-encoded
    pub(crate) fn url_with_segment(&self, endpoint: &str, segment: &str) -> Result<Url> {
        let mut url = self.url(endpoint)?;
        url.path_segments_mut()
            .map_err(|_| TrackitError::Config("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Build request builder for public endpoints
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.request_to(method, url))
    }

    /// Build request builder carrying the bearer token
    pub(crate) fn authed_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        self.authed_request_to(method, url)
    }

    /// Build request builder carrying the bearer token for an already resolved URL
    pub(crate) fn authed_request_to(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self
            .tokens
            .get_token()
            .ok_or(TrackitError::NotAuthenticated)?;
        Ok(self.request_to(method, url).bearer_auth(token))
    }

    fn request_to(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "building request");
        self.http_client.request(method, url)
    }

    /// Send a request and decode a JSON body. A success status with no body is invalid.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = check_status(builder.send().await?).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(TrackitError::InvalidResponse(format!(
                "empty body with status {}",
                status.as_u16()
            )));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose body may be empty; an empty body decodes as `T::default()`
    pub(crate) async fn send_ack<T: DeserializeOwned + Default>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let response = check_status(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    debug!(status = status.as_u16(), %message, "request rejected");
    Err(TrackitError::api_error(status, message))
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(TrackitError::Config("API base URL is empty".to_string()));
    }
    let mut url = Url::parse(trimmed)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
