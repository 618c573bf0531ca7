//! The extraction task driver.
//!
//! Builds the prompt once, then runs the full gateway-call-and-repair cycle
//! under a bounded retry loop with exponential backoff. Every attempt's
//! response is archived into a transcript and its token usage accumulated,
//! whether or not the attempt succeeded, so a task's full history is
//! auditable afterwards.

use crate::backend::{Backend, BackendError};
use crate::config::{Config, RetryConfig};
use crate::gateway::{self, ChatTurn, GatewayError, LlmRequest};
use crate::prompt::{REASONING_INSTRUCTION, enzyme_substrate_prompt, kinase_substrate_prompt};
use crate::repair::{self, RelationPair, RepairError};
use crate::{log_debug, log_warn};
use std::time::Duration;
use thiserror::Error;

/// Which relationship family a task extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Enzyme-substrate pairs, answered as a list-of-pairs literal
    EnzymeSubstrate,
    /// Kinase-substrate pairs, answered as a mapping literal keyed by
    /// UniProt accession
    KinaseSubstrate,
}

impl RelationKind {
    /// Build this kind's prompt for the given paper text.
    pub fn build_prompt(self, paper_text: &str) -> String {
        match self {
            Self::EnzymeSubstrate => enzyme_substrate_prompt(paper_text),
            Self::KinaseSubstrate => kinase_substrate_prompt(paper_text),
        }
    }
}

/// Attempt ceiling and backoff for one extraction task.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_wait: Duration::from_secs(1),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_wait: config.initial_wait(),
        }
    }
}

/// Result of a successful extraction task.
#[derive(Debug)]
pub struct ExtractionOutcome {
    /// The extracted pairs; `None` when the model answered with a valid but
    /// empty structure ("no relationships found")
    pub pairs: Option<Vec<RelationPair>>,
    /// The final attempt's response body, verbatim
    pub raw: serde_json::Value,
    /// Per-attempt responses across the whole task, labeled and joined
    pub transcript: String,
    /// Token usage summed across every attempt
    pub total_usage: u64,
    /// Whether the final attempt's generation was cut off
    pub truncated: bool,
}

/// Terminal failure of an extraction task. Transient attempt errors never
/// escape; they are retried until the ceiling and folded into `Exhausted`.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Config(#[from] BackendError),
    #[error("all {attempts} attempts failed; unable to extract relationship pairs")]
    Exhausted { attempts: u32 },
}

/// One attempt's failure. Caught at the attempt boundary and logged.
#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Repair(#[from] RepairError),
}

/// Extract relationship pairs of `kind` from `paper_text` via the named
/// backend.
///
/// Backend resolution happens before the retry loop: an unknown name or a
/// missing API key is a configuration error and surfaces immediately,
/// without consuming an attempt.
pub async fn extract_relationships(
    config: &Config,
    backend_name: &str,
    kind: RelationKind,
    paper_text: &str,
) -> Result<ExtractionOutcome, ExtractError> {
    let backend: Backend = backend_name.parse()?;
    let request = gateway::request_for(config, backend)?;
    let prompt = kind.build_prompt(paper_text);
    extract_with_request(request.as_ref(), &prompt, RetryPolicy::from(&config.retry)).await
}

/// The retry loop proper, over any request wrapper (the test seam).
///
/// The prompt is built once by the caller; the instructions never change
/// between retries, so neither does the conversation.
pub async fn extract_with_request(
    request: &dyn LlmRequest,
    prompt: &str,
    retry: RetryPolicy,
) -> Result<ExtractionOutcome, ExtractError> {
    let turns = vec![ChatTurn::user(prompt)];

    let mut retries = 0u32;
    let mut wait = retry.initial_wait;
    let mut total_usage = 0u64;
    let mut transcript: Vec<String> = Vec::new();

    while retries < retry.max_retries {
        let attempt_no = retries + 1;
        match run_attempt(request, &turns, attempt_no, &mut total_usage, &mut transcript).await {
            Ok(outcome) => return Ok(outcome),
            Err(e) => {
                retries += 1;
                log_warn!("Attempt {}/{} failed: {}", retries, retry.max_retries, e);
                if retries < retry.max_retries {
                    log_debug!("Retrying in {:?}...", wait);
                    tokio::time::sleep(wait).await;
                    wait *= 2;
                }
            }
        }
    }

    Err(ExtractError::Exhausted {
        attempts: retry.max_retries,
    })
}

/// One build-send-repair-parse cycle. Usage and transcript are accumulated
/// even when the attempt fails.
async fn run_attempt(
    request: &dyn LlmRequest,
    turns: &[ChatTurn],
    attempt_no: u32,
    total_usage: &mut u64,
    transcript: &mut Vec<String>,
) -> Result<ExtractionOutcome, AttemptError> {
    let response = request.request(turns, REASONING_INSTRUCTION).await?;
    log_debug!("Attempt {} response: {}", attempt_no, response.content);

    let content = repair::close_angle_brackets(&response.content);
    *total_usage += response.usage;
    transcript.push(format!("Attempt {attempt_no}:\n{content}"));

    let pairs = repair::extract_pairs(&content)?;
    let pairs = if pairs.is_empty() { None } else { Some(pairs) };

    Ok(ExtractionOutcome {
        pairs,
        raw: response.raw,
        transcript: transcript.join("\n\n"),
        total_usage: *total_usage,
        truncated: response.truncated,
    })
}
