//! GI HTTP client.
//!
//! Thin transport layer: one method per upstream endpoint, each mapping
//! non-success statuses and parse failures to `GiError`. Retry and caching
//! policy live with the callers.

use serde_json::Value;

use super::error::GiError;
use super::types::{SearchBody, SearchEndpoint, TokenResponse, extract_course_list};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the GI client.
#[derive(Debug, Clone)]
pub struct GiConfig {
    /// Base URL of the GI API
    pub base_url: String,
    /// Pre-shared client identifier for the client-credentials grant
    pub client_id: String,
    /// API secret sent as the grant `code`
    pub api_secret: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GiConfig {
    /// Create a new config with the given credentials.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            api_secret: api_secret.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// GI API client.
#[derive(Debug, Clone)]
pub struct GiClient {
    http: reqwest::Client,
    config: GiConfig,
}

impl GiClient {
    /// Create a new GI client with the given configuration.
    pub fn new(config: GiConfig) -> Result<Self, GiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Request a bearer token via the client-credentials grant.
    ///
    /// Returns the parsed token response; validity windows are the caller's
    /// concern (see `TokenManager`).
    pub async fn authenticate(&self) -> Result<TokenResponse, GiError> {
        let url = format!("{}/auth/authenticateToken", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("code", self.config.api_secret.as_str()),
                ("client_id", self.config.client_id.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GiError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| GiError::Json {
            message: e.to_string(),
        })?;

        TokenResponse::from_json(&body).ok_or(GiError::MissingToken)
    }

    /// POST to one of the search endpoints, returning the course list.
    pub async fn search(
        &self,
        endpoint: SearchEndpoint,
        token: &str,
        body: &SearchBody,
    ) -> Result<Vec<Value>, GiError> {
        let url = format!("{}/courses/{}", self.config.base_url, endpoint.path());

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| GiError::Json {
            message: e.to_string(),
        })?;

        Ok(extract_course_list(&body))
    }

    /// Fetch GPS detail for a course group by its public id.
    pub async fn course_group_gps(&self, token: &str, public_id: &str) -> Result<Value, GiError> {
        let url = format!("{}/courses/getCourseGroupGPS", self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("publicId", public_id)])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| GiError::Json {
            message: e.to_string(),
        })
    }
}
