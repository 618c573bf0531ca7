use crate::backend::Backend;
use crate::log_debug;

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration structure for the Kinex application
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Default LLM backend
    pub default_backend: String,
    /// Backend-specific configurations
    pub backends: HashMap<String, BackendConfig>,
    /// Retry behavior for extraction tasks
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Backend-specific configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct BackendConfig {
    /// API key for the backend
    pub api_key: String,
    /// Model override; the backend's standard model is used when empty
    #[serde(default)]
    pub model: String,
    /// Additional request parameters for the backend
    #[serde(default)]
    pub additional_params: HashMap<String, String>,
}

/// Retry behavior configuration
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of attempts before an extraction task fails
    pub max_retries: u32,
    /// Wait before the first retry, in seconds; doubles on each failure
    pub initial_wait_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_wait_secs: 1,
        }
    }
}

impl RetryConfig {
    /// Initial backoff as a `Duration`
    pub fn initial_wait(&self) -> Duration {
        Duration::from_secs(self.initial_wait_secs)
    }
}

impl Config {
    /// Load the configuration from the file
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let config = if config_path.exists() {
            let config_content = fs::read_to_string(&config_path)?;
            toml::from_str(&config_content)
                .with_context(|| format!("Invalid configuration file: {}", config_path.display()))?
        } else {
            Self::default()
        };

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Save the configuration to the file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        let config_content = toml::to_string(self)?;
        fs::write(config_path, config_content)?;
        log_debug!("Configuration saved: {:?}", self);
        Ok(())
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("kinex");
        std::fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// Update the configuration with new values
    pub fn update(
        &mut self,
        backend: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
        additional_params: Option<HashMap<String, String>>,
        max_retries: Option<u32>,
        initial_wait_secs: Option<u64>,
    ) -> Result<()> {
        if let Some(backend) = backend {
            // Reject unknown names before they end up in the config file
            let parsed: Backend = backend.parse()?;
            self.default_backend = parsed.name().to_string();
            self.backends
                .entry(self.default_backend.clone())
                .or_default();
        }

        let backend_config = self
            .backends
            .get_mut(&self.default_backend)
            .context("Could not get default backend")?;

        if let Some(key) = api_key {
            backend_config.api_key = key;
        }
        if let Some(model) = model {
            backend_config.model = model;
        }
        if let Some(params) = additional_params {
            backend_config.additional_params.extend(params);
        }
        if let Some(retries) = max_retries {
            self.retry.max_retries = retries;
        }
        if let Some(wait) = initial_wait_secs {
            self.retry.initial_wait_secs = wait;
        }

        log_debug!("Configuration updated: {:?}", self);
        Ok(())
    }

    /// Get the configuration for a specific backend
    pub fn get_backend_config(&self, backend: Backend) -> Option<&BackendConfig> {
        self.backends.get(backend.name())
    }

    /// Resolve the API key for a backend: config first, then environment
    pub fn api_key_for(&self, backend: Backend) -> Option<String> {
        if let Some(cfg) = self.get_backend_config(backend)
            && !cfg.api_key.is_empty()
        {
            return Some(cfg.api_key.clone());
        }
        std::env::var(backend.api_key_env())
            .ok()
            .filter(|k| !k.is_empty())
    }

    /// Resolve the model identifier for a backend: config override or the
    /// backend's standard model
    pub fn model_for(&self, backend: Backend) -> String {
        match self.get_backend_config(backend) {
            Some(cfg) if !cfg.model.is_empty() => cfg.model.clone(),
            _ => backend.model_id().to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut backends = HashMap::new();
        for backend in Backend::ALL {
            backends.insert(backend.name().to_string(), BackendConfig::default());
        }

        Self {
            default_backend: Backend::default().name().to_string(),
            backends,
            retry: RetryConfig::default(),
        }
    }
}
