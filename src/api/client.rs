//! HTTP implementation of the API collaborators.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::models::{PlanId, SessionLog, SessionRecord, WorkoutPlan};
use crate::api::provider::{PlanProvider, SessionStore};

const API_PREFIX: &str = "/api/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the fitness REST API
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Create a client for the server at `api_url` (without the `/api/v1` suffix)
    pub fn new(api_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(api_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = api_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::Config("API URL is empty".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: format!("{}{}", trimmed, API_PREFIX),
            token: None,
            client,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Token {}", token)),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        decode(check(response, what).await?).await
    }

    async fn post<B>(&self, path: &str, body: &B, what: &str) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(path, "POST");
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        check(response, what).await
    }
}

async fn check(response: Response, what: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), what, "API request failed");
    Err(ApiError::from_status(status.as_u16(), body, what))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl PlanProvider for ApiClient {
    async fn get_plan(&self, id: PlanId) -> Result<WorkoutPlan, ApiError> {
        self.get_json(&format!("/plans/{}", id), &format!("plan {}", id))
            .await
    }

    async fn list_plans(&self) -> Result<Vec<WorkoutPlan>, ApiError> {
        self.get_json("/plans", "plans").await
    }

    async fn suggest_plan(&self) -> Result<WorkoutPlan, ApiError> {
        self.get_json("/plans/generate", "plan suggestion").await
    }

    async fn save_plan(&self, plan: &WorkoutPlan) -> Result<WorkoutPlan, ApiError> {
        decode(self.post("/plans", plan, "plans").await?).await
    }
}

#[async_trait]
impl SessionStore for ApiClient {
    async fn save_session(&self, record: &SessionRecord) -> Result<(), ApiError> {
        // The body echoes the stored session; only the status matters.
        self.post("/sessions/", record, "sessions").await?;
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionLog>, ApiError> {
        self.get_json("/sessions/", "sessions").await
    }
}
