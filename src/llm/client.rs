//! HTTP client for an Ollama inference server.
//!
//! Build from a [`Config`] (see [`Config::from_env`] for the `DEVTEAM_*`
//! variables) or with an explicit base URL and timeout.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::types::{ChatRequest, ChatResponse};
use crate::config::Config;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Model returned an empty response")]
    EmptyResponse,
}

/// HTTP client for the Ollama chat API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: Client,
}

impl OllamaClient {
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.ollama_url.clone(), config.timeout)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat request and wait for the full reply.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let url = format!("{}/api/chat", self.base_url);
        tracing::debug!(%url, model = %request.model, messages = request.messages.len(), "Sending chat request");

        let response = self.client.post(&url).json(request).send().await?;
        let reply: ChatResponse = self.handle_response(response).await?;

        if reply.message.content.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(reply)
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatResponse, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::ModelNotFound(body)),
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }
}
