//! Uniform call interface over the supported LLM backends.
//!
//! The gateway resolves a [`Backend`] to its model-specific request wrapper
//! and forwards a structured conversation. It performs no retry of its own;
//! retry policy lives in the [`crate::extract`] controller layered above.

pub mod gemini;
pub mod openai;

use crate::backend::{Backend, BackendError};
use crate::config::Config;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// A role-tagged message in a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    /// A user-role turn; the only role this tool produces.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// What a backend call returns: the full response body, the answer text, a
/// token usage count, and whether generation was cut off.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The backend's response body, verbatim
    pub raw: serde_json::Value,
    /// The answer text
    pub content: String,
    /// Total tokens consumed by the call
    pub usage: u64,
    /// True when the backend stopped at its generation limit
    pub truncated: bool,
}

/// Gateway call failure. Transient from the retry controller's perspective,
/// except for [`GatewayError::Config`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Config(#[from] BackendError),
}

/// A model-specific request wrapper.
///
/// This trait is the seam the retry controller is tested through: anything
/// that can turn a conversation into an [`LlmResponse`] can stand in for a
/// real backend.
#[async_trait]
pub trait LlmRequest: Send + Sync {
    async fn request(
        &self,
        turns: &[ChatTurn],
        instruction: &str,
    ) -> Result<LlmResponse, GatewayError>;
}

/// Build the request wrapper for a backend from the configuration.
///
/// Fails with a configuration error (never retried) when the backend has no
/// usable API key.
pub fn request_for(config: &Config, backend: Backend) -> Result<Box<dyn LlmRequest>, BackendError> {
    let api_key = config
        .api_key_for(backend)
        .ok_or_else(|| BackendError::MissingApiKey(backend.name().to_string()))?;
    let model = config.model_for(backend);
    let additional_params = config
        .get_backend_config(backend)
        .map(|c| c.additional_params.clone())
        .unwrap_or_default();

    match backend {
        Backend::ChatGpt4o => Ok(Box::new(openai::OpenAiRequest::new(
            api_key,
            model,
            additional_params,
        ))),
        Backend::Gemini15Pro | Backend::Gemini15Flash => Ok(Box::new(gemini::GeminiRequest::new(
            api_key,
            model,
            additional_params,
        ))),
    }
}

/// Send a conversation plus the reasoning instruction to a backend.
pub async fn respond(
    config: &Config,
    backend: Backend,
    turns: &[ChatTurn],
    instruction: &str,
) -> Result<LlmResponse, GatewayError> {
    let request = request_for(config, backend)?;
    request.request(turns, instruction).await
}
