//! HTTP transport

use async_trait::async_trait;
use tracing::debug;

use flashcards_core::{GenerationError, GenerationResult};

use crate::request::ApiRequest;
use crate::response::ResponseEnvelope;

/// Sends a request and returns the raw reply
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Send `request` once; no retries
    async fn send(&self, request: &ApiRequest) -> GenerationResult<ResponseEnvelope>;
}

#[async_trait]
impl<T: CompletionApi + ?Sized> CompletionApi for Box<T> {
    async fn send(&self, request: &ApiRequest) -> GenerationResult<ResponseEnvelope> {
        (**self).send(request).await
    }
}

/// OpenAI (or compatible) API client
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a client for `base_url` (e.g. `https://api.openai.com/v1`)
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// API base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout(e.to_string())
    } else {
        GenerationError::Transport(e.to_string())
    }
}

#[async_trait]
impl CompletionApi for OpenAIClient {
    async fn send(&self, request: &ApiRequest) -> GenerationResult<ResponseEnvelope> {
        let url = format!("{}{}", self.base_url, request.endpoint_path());
        debug!(%url, model = request.model(), "sending completion request");

        let mut builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = request.timeout() {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        if body.trim().is_empty() {
            return Err(GenerationError::NoResponse("empty response body".into()));
        }

        let envelope: Option<ResponseEnvelope> = serde_json::from_str(&body).map_err(|e| {
            GenerationError::UnrecognizedResponse(format!("Failed to parse response: {e}"))
        })?;
        envelope.ok_or_else(|| GenerationError::NoResponse("null response body".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = OpenAIClient::new("sk-test", "http://localhost:1234/v1/");
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }
}
