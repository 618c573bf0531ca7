//! Kinex - AI-powered enzyme-substrate relationship extraction
//!
//! This library extracts structured enzyme-substrate and kinase-substrate
//! relationship pairs from scientific paper text by prompting an LLM backend
//! and repairing its free-form response into a validated pair list, with
//! bounded retry and exponential backoff around the whole cycle.

// Allow certain clippy warnings that are either stylistic or from external dependencies
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod article;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod extract;
pub mod gateway;
pub mod literal;
pub mod logger;
pub mod prompt;
pub mod repair;
pub mod ui;
pub mod uniprot;

// Re-export important structs and functions for easier testing
pub use backend::{Backend, BackendError};
pub use config::{BackendConfig, Config, RetryConfig};
pub use extract::{
    ExtractError, ExtractionOutcome, RelationKind, RetryPolicy, extract_relationships,
    extract_with_request,
};
pub use repair::RelationPair;
