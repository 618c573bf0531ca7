//! LLM backend registry.
//!
//! Single source of truth for the supported backends and their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    ChatGpt4o,
    #[default]
    Gemini15Pro,
    Gemini15Flash,
}

impl Backend {
    /// All available backends
    pub const ALL: &'static [Backend] = &[
        Backend::ChatGpt4o,
        Backend::Gemini15Pro,
        Backend::Gemini15Flash,
    ];

    /// Backend name as used in config files and the CLI
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChatGpt4o => "chatgpt_4o",
            Self::Gemini15Pro => "gemini_15_pro",
            Self::Gemini15Flash => "gemini_15_flash",
        }
    }

    /// Model identifier sent on the wire
    pub const fn model_id(&self) -> &'static str {
        match self {
            Self::ChatGpt4o => "gpt-4o",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Gemini15Flash => "gemini-1.5-flash",
        }
    }

    /// Environment variable name for the API key
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::ChatGpt4o => "OPENAI_API_KEY",
            Self::Gemini15Pro | Self::Gemini15Flash => "GEMINI_API_KEY",
        }
    }

    /// Get all backend names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl FromStr for Backend {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .find(|b| b.name() == lower)
            .copied()
            .ok_or_else(|| BackendError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Backend configuration error. Unlike extraction failures these are caller
/// bugs and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Unknown backend: {0}. Supported: chatgpt_4o, gemini_15_pro, gemini_15_flash")]
    Unknown(String),
    #[error("API key required for backend: {0}")]
    MissingApiKey(String),
}
