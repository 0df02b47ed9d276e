//! HTTP client for the AI assist proxy.
//!
//! The proxy fronts the text-enhancement and web-search backends behind a
//! single POST endpoint taking `{action, payload}` envelopes. Configuration
//! is via environment variables:
//! - `IDEAFLOW_ASSIST_URL` - Endpoint URL (default:
//!   `http://localhost:8888/.netlify/functions/gemini`)
//! - `IDEAFLOW_ASSIST_API_KEY` - Bearer token (optional for local)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::WebInsights;

/// Default URL for local development behind the functions emulator.
const DEFAULT_URL: &str = "http://localhost:8888/.netlify/functions/gemini";

/// Assist call errors.
///
/// These never reach the user: the capture workflow converts them to an
/// absent enhancement and the deep-search workflow converts them to a
/// degraded payload.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Assist proxy returned {0}: {1}")]
    Status(StatusCode, String),
}

/// Enrichment returned for a capture. Both fields are best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enhancement {
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Seam between the workflows and the assist backend, so tests can run
/// against a scripted fake.
pub trait Assist {
    fn enhance(
        &self,
        content: &str,
    ) -> impl std::future::Future<Output = Result<Enhancement, AssistError>>;

    fn search_web(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<WebInsights, AssistError>>;
}

/// Reqwest-backed assist client.
#[derive(Debug, Clone)]
pub struct AssistClient {
    url: String,
    api_key: Option<String>,
    client: Client,
}

impl AssistClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let url = std::env::var("IDEAFLOW_ASSIST_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let api_key = std::env::var("IDEAFLOW_ASSIST_API_KEY").ok();
        Self::new(url, api_key)
    }

    /// Create with explicit configuration.
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            url: url.into(),
            api_key,
            client: Client::new(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<T, AssistError> {
        let mut req = self.client.post(&self.url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        let response = req
            .json(&serde_json::json!({ "action": action, "payload": payload }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AssistError::Status(status, body))
        }
    }
}

impl Assist for AssistClient {
    async fn enhance(&self, content: &str) -> Result<Enhancement, AssistError> {
        self.call("enhance", serde_json::json!({ "content": content }))
            .await
    }

    async fn search_web(&self, query: &str) -> Result<WebInsights, AssistError> {
        self.call("search", serde_json::json!({ "query": query }))
            .await
    }
}
