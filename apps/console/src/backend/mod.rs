//! Backend client: the single point of entry for all recruiting backend calls.
//!
//! Every request leaves through `BackendClient`, which stamps the model
//! version header on it. Handlers and agents never build their own
//! `reqwest::Client`.
//!
//! One attempt per user action: no retries, no timeouts.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod contracts;

/// Header identifying the AI model version to the backend.
pub const MODEL_VERSION_HEADER: &str = "x-llama-version";
/// Value sent in `MODEL_VERSION_HEADER`. Hardcoded so every page talks to one model.
pub const MODEL_VERSION: &str = "Llama-3.x";
/// Human-facing model name used in loading messages and the status badge.
pub const MODEL_LABEL: &str = "Llama 3.x";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// Thin wrapper over `reqwest::Client` bound to the backend base URL.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(MODEL_VERSION_HEADER),
            HeaderValue::from_static(MODEL_VERSION),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POSTs `body` as JSON to `endpoint` and deserializes the JSON reply.
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {endpoint} (json)");
        let response = self.client.post(self.url(endpoint)).json(body).send().await?;
        decode(endpoint, response).await
    }

    /// POSTs a multipart form to `endpoint` and deserializes the JSON reply.
    pub async fn post_multipart<T>(
        &self,
        endpoint: &str,
        form: multipart::Form,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        debug!("POST {endpoint} (multipart)");
        let response = self
            .client
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await?;
        decode(endpoint, response).await
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // Prefer the backend's own message when it sent a JSON error body
        let message = serde_json::from_str::<BackendErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(BackendError::Api {
            status: status.as_u16(),
            message,
        });
    }

    debug!("{endpoint} answered {status} ({} bytes)", body.len());
    serde_json::from_str(&body).map_err(BackendError::Parse)
}
