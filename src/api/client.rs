//! HTTP API Client
//!
//! reqwest implementation of [`HealthApi`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{ApiError, ApiResult};
use super::types::{
    ErrorBody, FoodAnalysis, FoodEntry, FoodTrendPoint, Goals, HealthSummary, HealthTrendPoint,
    SyncReceipt, WatchSyncRecord,
};
use super::HealthApi;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpHealthApiConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout; `None` keeps the client's default
    pub request_timeout: Option<Duration>,
}

impl Default for HttpHealthApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
        }
    }
}

/// ClawHealth REST API client
pub struct HttpHealthApi {
    client: Client,
    base_url: String,
}

impl HttpHealthApi {
    /// Create a new client with the given configuration
    pub fn new(config: HttpHealthApiConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            // Normalize: remove trailing slash
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        decode(response).await
    }

    /// Send a JSON body; any 2xx succeeds, the response body is best-effort
    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Option<T>>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, %method, "sending JSON body");

        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        decode_optional(response).await
    }
}

/// Decode a 2xx JSON body, or turn anything else into [`ApiError::Rejected`]
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = check_status(response).await?;
    response.json().await.map_err(ApiError::from_transport)
}

/// Accept any 2xx; the body is decoded when it matches `T` and dropped otherwise
async fn decode_optional<T: DeserializeOwned>(response: Response) -> ApiResult<Option<T>> {
    let response = check_status(response).await?;
    let status = response.status();
    let body = response.bytes().await.map_err(ApiError::from_transport)?;
    if body.is_empty() {
        return Ok(None);
    }

    match serde_json::from_slice(&body) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!(status = status.as_u16(), error = %e, "ignoring unexpected response body");
            Ok(None)
        }
    }
}

async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Prefer the server's `{"error": ...}`, fall back to the status text
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

    tracing::warn!(status = status.as_u16(), %message, "API rejected request");

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl HealthApi for HttpHealthApi {
    async fn health_summary(&self, days: u32) -> ApiResult<HealthSummary> {
        self.get_json(&format!("/api/health/summary?days={}", days)).await
    }

    async fn health_trend(&self, days: u32) -> ApiResult<Vec<HealthTrendPoint>> {
        self.get_json(&format!("/api/health/trend?days={}", days)).await
    }

    async fn health_records(&self, limit: u32) -> ApiResult<Vec<WatchSyncRecord>> {
        self.get_json(&format!("/api/health/data?limit={}", limit)).await
    }

    async fn sync_health(&self, record: &WatchSyncRecord) -> ApiResult<Option<SyncReceipt>> {
        self.send_json(reqwest::Method::POST, "/api/health/sync", record)
            .await
    }

    async fn food_analysis(&self, date: &str) -> ApiResult<FoodAnalysis> {
        self.get_json(&format!(
            "/api/food/analysis?date={}",
            urlencoding::encode(date)
        ))
        .await
    }

    async fn food_trend(&self, days: u32) -> ApiResult<Vec<FoodTrendPoint>> {
        self.get_json(&format!("/api/food/trend?days={}", days)).await
    }

    async fn add_food_entry(&self, entry: &FoodEntry) -> ApiResult<Option<FoodEntry>> {
        self.send_json(reqwest::Method::POST, "/api/food/entries", entry)
            .await
    }

    async fn delete_food_entry(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/food/entries/{}", id));
        tracing::debug!(%url, "DELETE");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        check_status(response).await.map(|_| ())
    }

    async fn goals(&self) -> ApiResult<Goals> {
        self.get_json("/api/goals").await
    }

    async fn save_goals(&self, goals: &Goals) -> ApiResult<Option<Goals>> {
        self.send_json(reqwest::Method::PUT, "/api/goals", goals)
            .await
    }
}
