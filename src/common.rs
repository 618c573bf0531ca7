use crate::backend::Backend;
use crate::config::Config;
use anyhow::Result;
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the default LLM backend
    #[arg(long, help = "Override the default LLM backend", value_parser = available_backends_parser)]
    pub backend: Option<String>,

    /// Override the attempt ceiling for this task
    #[arg(long, help = "Override the attempt ceiling for this task")]
    pub max_retries: Option<u32>,

    /// Override the initial backoff wait in seconds
    #[arg(long, help = "Override the initial backoff wait in seconds")]
    pub initial_wait: Option<u64>,
}

impl CommonParams {
    /// Apply command-line overrides to a loaded configuration
    pub fn apply_to_config(&self, config: &mut Config) -> Result<()> {
        if let Some(backend_str) = &self.backend {
            let backend: Backend = backend_str.parse()?;
            let backend_name = backend.name().to_string();

            if config.default_backend != backend_name {
                config.backends.entry(backend_name.clone()).or_default();
                config.default_backend = backend_name;
            }
        }

        if let Some(retries) = self.max_retries {
            config.retry.max_retries = retries;
        }

        if let Some(wait) = self.initial_wait {
            config.retry.initial_wait_secs = wait;
        }

        Ok(())
    }
}

/// Validates that a backend name is available in the system
pub fn available_backends_parser(s: &str) -> Result<String, String> {
    match s.parse::<Backend>() {
        Ok(backend) => Ok(backend.name().to_string()),
        Err(_) => Err(format!(
            "Invalid backend '{}'. Available backends: {}",
            s,
            Backend::all_names().join(", ")
        )),
    }
}
