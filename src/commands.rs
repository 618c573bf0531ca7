use crate::article;
use crate::backend::Backend;
use crate::cli::Commands;
use crate::common::CommonParams;
use crate::config::Config;
use crate::extract::{RelationKind, extract_relationships};
use crate::log_debug;
use crate::ui;
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::collections::HashMap;
use std::fs;

/// Dispatch a parsed subcommand to its handler
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Extract {
            common,
            file,
            html,
            kind,
            transcript,
        } => handle_extract(common, &file, html, &kind, transcript).await,
        Commands::Config {
            common,
            api_key,
            model,
            param,
        } => handle_config(&common, api_key, model, param),
        Commands::ListBackends => handle_list_backends(),
    }
}

/// Handle the `Extract` command
async fn handle_extract(
    common: CommonParams,
    file: &str,
    html: bool,
    kind: &str,
    show_transcript: bool,
) -> Result<()> {
    let mut config = Config::load()?;
    common.apply_to_config(&mut config)?;

    let raw_input =
        fs::read_to_string(file).with_context(|| format!("Failed to read input file: {file}"))?;

    let paper_text = if html {
        let body = article::article_text(&raw_input);
        if body == article::NOT_FOUND {
            return Err(anyhow!(
                "No article content region found in {file}. Is this a full-text publisher page?"
            ));
        }
        body
    } else {
        raw_input
    };

    let kind = match kind {
        "kinase" => RelationKind::KinaseSubstrate,
        _ => RelationKind::EnzymeSubstrate,
    };

    let backend_name = config.default_backend.clone();
    log_debug!("Extracting with backend {backend_name}, kind {kind:?}");

    let spinner = ui::create_spinner(&format!(
        "Extracting relationships via {backend_name}..."
    ));
    let result = extract_relationships(&config, &backend_name, kind, &paper_text).await;
    spinner.finish_and_clear();

    let outcome = result.map_err(|e| {
        ui::print_error(&format!("Extraction failed: {e}"));
        anyhow!(e)
    })?;

    match &outcome.pairs {
        Some(pairs) => {
            ui::print_success(&format!("Extracted {} relationship pair(s)", pairs.len()));
            println!("{}", serde_json::to_string_pretty(pairs)?);
        }
        None => {
            ui::print_warning("No relationships extracted from this paper.");
        }
    }

    ui::print_info(&format!(
        "Token usage: {}{}",
        outcome.total_usage,
        if outcome.truncated {
            " (response was truncated)"
        } else {
            ""
        }
    ));

    if show_transcript {
        ui::print_newline();
        ui::print_message(&outcome.transcript);
    }

    Ok(())
}

/// Handle the `Config` command
fn handle_config(
    common: &CommonParams,
    api_key: Option<String>,
    model: Option<String>,
    param: Option<Vec<String>>,
) -> Result<()> {
    let mut config = Config::load()?;

    let no_changes = common.backend.is_none()
        && common.max_retries.is_none()
        && common.initial_wait.is_none()
        && api_key.is_none()
        && model.is_none()
        && param.is_none();

    if no_changes {
        print_current_config(&config);
        return Ok(());
    }

    let additional_params = param.map(parse_additional_params).transpose()?;

    config.update(
        common.backend.clone(),
        api_key,
        model,
        additional_params,
        common.max_retries,
        common.initial_wait,
    )?;
    config.save()?;

    ui::print_success("Configuration updated.");
    Ok(())
}

/// Handle the `ListBackends` command
fn handle_list_backends() -> Result<()> {
    ui::print_info("Available LLM backends:");
    for backend in Backend::ALL {
        ui::print_message(&format!(
            "  {} ({})",
            backend.name().green().bold(),
            backend.model_id()
        ));
    }
    Ok(())
}

fn print_current_config(config: &Config) {
    ui::print_info("Current configuration:");
    ui::print_message(&format!(
        "  Default backend: {}",
        config.default_backend.green().bold()
    ));
    ui::print_message(&format!(
        "  Retry: {} attempts, {}s initial wait",
        config.retry.max_retries, config.retry.initial_wait_secs
    ));
    for backend in Backend::ALL {
        let Some(backend_config) = config.get_backend_config(*backend) else {
            continue;
        };
        let key_state = if backend_config.api_key.is_empty() {
            "unset".yellow()
        } else {
            "set".green()
        };
        ui::print_message(&format!(
            "  {}: model {}, api key {}",
            backend.name().bold(),
            config.model_for(*backend),
            key_state
        ));
    }
}

/// Parse `key=value` additional parameters from the command line
fn parse_additional_params(params: Vec<String>) -> Result<HashMap<String, String>> {
    let mut parsed = HashMap::new();
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid parameter '{param}'; expected key=value"))?;
        parsed.insert(key.to_string(), value.to_string());
    }
    Ok(parsed)
}
