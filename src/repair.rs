//! Response repair and payload extraction.
//!
//! The models are instructed to put their machine-readable answer inside a
//! `<<...>>` span, but the raw responses drift: closing brackets get dropped
//! at the end of generation, spans get wrapped across lines, and the answer
//! often shows up once in the reasoning and again at the end. Each helper
//! here compensates for one observed failure shape, applied in fixed order
//! by the retry controller.

use crate::literal::{Literal, LiteralError, parse_literal};
use crate::log_debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

// Non-greedy so that back-to-back spans match separately
static DELIMITED_PAYLOAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<.*?>>").expect("Should compile: DELIMITED_PAYLOAD_RE"));

/// One extracted enzyme-substrate (or kinase-substrate) relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationPair {
    pub enzyme: String,
    pub substrate: String,
}

impl RelationPair {
    pub fn new(enzyme: impl Into<String>, substrate: impl Into<String>) -> Self {
        Self {
            enzyme: enzyme.into(),
            substrate: substrate.into(),
        }
    }
}

/// Errors from the repair pipeline. All of these are transient from the
/// retry controller's point of view.
#[derive(Debug, Error)]
pub enum RepairError {
    #[error("no delimited payload found in the response")]
    NoPayload,
    #[error("failed to parse extracted payload: {0}")]
    Parse(#[source] LiteralError),
    #[error("payload is not a list of pairs or a mapping: {0}")]
    Shape(String),
}

/// Repair a response that lost the final `>` of its closing delimiter.
///
/// Trailing whitespace is trimmed first; a single trailing `>` becomes `>>`.
pub fn close_angle_brackets(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.ends_with('>') && !trimmed.ends_with(">>") {
        let mut repaired = trimmed.to_string();
        repaired.push('>');
        repaired
    } else {
        trimmed.to_string()
    }
}

/// Run the repair pipeline over a (already angle-repaired) response body.
///
/// Newlines are flattened so a payload the model wrapped across lines still
/// matches as one span; when several spans exist the last one wins, since
/// models tend to restate the answer after their reasoning. The returned
/// pairs are deduplicated in first-occurrence order. An empty vec is a
/// valid outcome ("no relationships found"), distinct from `NoPayload`.
pub fn extract_pairs(content: &str) -> Result<Vec<RelationPair>, RepairError> {
    let flattened = content.replace('\n', "");
    let payload = DELIMITED_PAYLOAD_RE
        .find_iter(&flattened)
        .last()
        .ok_or(RepairError::NoPayload)?
        .as_str();

    // Strip the << >> markers
    let interior = &payload[2..payload.len() - 2];
    let value = close_trailing_brackets(interior)?;
    let pairs = literal_to_pairs(value)?;
    Ok(dedup_pairs(pairs))
}

/// Parse `text` as a literal, repairing a single missing closing bracket.
///
/// Generation limits routinely cut the structure off right before its last
/// bracket. Try the text as-is, then with each of `]`, `)`, `}` appended;
/// the first successful parse wins. The original parse error is the one
/// reported if nothing helps.
pub fn close_trailing_brackets(text: &str) -> Result<Literal, RepairError> {
    let original_err = match parse_literal(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    for bracket in ["]", ")", "}"] {
        let candidate = format!("{text}{bracket}");
        if let Ok(value) = parse_literal(&candidate) {
            log_debug!("Repaired truncated payload by appending '{}'", bracket);
            return Ok(value);
        }
    }
    Err(RepairError::Parse(original_err))
}

/// Convert a parsed literal into relationship pairs.
///
/// A list's entries must each be a two-element sequence; a map's entries
/// become (key, value) pairs in insertion order.
fn literal_to_pairs(value: Literal) -> Result<Vec<RelationPair>, RepairError> {
    match value {
        Literal::List(entries) => entries.into_iter().map(entry_to_pair).collect(),
        Literal::Map(entries) => entries
            .into_iter()
            .map(|(key, val)| {
                let enzyme = scalar_text(key)?;
                let substrate = scalar_text(val)?;
                Ok(RelationPair { enzyme, substrate })
            })
            .collect(),
        other => Err(RepairError::Shape(format!(
            "expected a list or mapping at the top level, got {other:?}"
        ))),
    }
}

fn entry_to_pair(entry: Literal) -> Result<RelationPair, RepairError> {
    match entry {
        Literal::List(mut elements) if elements.len() == 2 => {
            let substrate = elements.pop().and_then(|e| e.to_text());
            let enzyme = elements.pop().and_then(|e| e.to_text());
            match (enzyme, substrate) {
                (Some(enzyme), Some(substrate)) => Ok(RelationPair { enzyme, substrate }),
                _ => Err(RepairError::Shape(
                    "pair elements must be scalar values".to_string(),
                )),
            }
        }
        other => Err(RepairError::Shape(format!(
            "expected a two-element pair, got {other:?}"
        ))),
    }
}

fn scalar_text(value: Literal) -> Result<String, RepairError> {
    value
        .to_text()
        .ok_or_else(|| RepairError::Shape("mapping entries must be scalar values".to_string()))
}

/// Remove exact duplicate pairs, keeping the first occurrence of each.
pub fn dedup_pairs(pairs: Vec<RelationPair>) -> Vec<RelationPair> {
    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .filter(|pair| seen.insert(pair.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_angle_brackets_appends_missing_one() {
        assert_eq!(close_angle_brackets("<<[[\"A\",\"B\"]]>  "), "<<[[\"A\",\"B\"]]>>");
    }

    #[test]
    fn test_close_angle_brackets_leaves_complete_pairs_alone() {
        assert_eq!(close_angle_brackets("<<[]>>"), "<<[]>>");
        assert_eq!(close_angle_brackets("no brackets"), "no brackets");
    }

    #[test]
    fn test_last_span_wins() {
        let content = "draft <<[[\"X\",\"Y\"]]>> final answer: <<[[\"A\",\"B\"]]>>";
        let pairs = extract_pairs(content).expect("Should extract");
        assert_eq!(pairs, vec![RelationPair::new("A", "B")]);
    }

    #[test]
    fn test_payload_split_across_lines() {
        let content = "<<[\n  [\"CDK1\", \"Histone H1\"]\n]>>";
        let pairs = extract_pairs(content).expect("Should extract");
        assert_eq!(pairs, vec![RelationPair::new("CDK1", "Histone H1")]);
    }

    #[test]
    fn test_no_payload_is_an_error() {
        assert!(matches!(
            extract_pairs("no relationships were found in this text"),
            Err(RepairError::NoPayload)
        ));
    }

    #[test]
    fn test_truncated_literal_is_repaired() {
        let value = close_trailing_brackets(r#"[["A", "B"]"#).expect("Should repair");
        assert_eq!(
            value,
            Literal::List(vec![Literal::List(vec![
                Literal::Str("A".to_string()),
                Literal::Str("B".to_string()),
            ])])
        );
    }

    #[test]
    fn test_mapping_becomes_pairs_in_order() {
        let pairs = extract_pairs("<<{\"Q86U12\": \"Q9FCE5\", \"Q86123\": \"Q15502\"}>>")
            .expect("Should extract");
        assert_eq!(
            pairs,
            vec![
                RelationPair::new("Q86U12", "Q9FCE5"),
                RelationPair::new("Q86123", "Q15502"),
            ]
        );
    }

    #[test]
    fn test_duplicates_removed_first_occurrence_kept() {
        let pairs = extract_pairs("<<[[\"A\",\"B\"],[\"A\",\"B\"],[\"C\",\"D\"]]>>")
            .expect("Should extract");
        assert_eq!(
            pairs,
            vec![RelationPair::new("A", "B"), RelationPair::new("C", "D")]
        );
    }

    #[test]
    fn test_empty_payload_is_valid_and_empty() {
        let pairs = extract_pairs("<<[]>>").expect("Should extract");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_malformed_entry_is_a_shape_error() {
        assert!(matches!(
            extract_pairs("<<[[\"A\",\"B\",\"C\"]]>>"),
            Err(RepairError::Shape(_))
        ));
    }
}
