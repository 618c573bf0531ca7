//! Candidate UniProt accession scanning.
//!
//! Matches are lexical only; nothing is checked against the UniProt
//! registry. False positives are expected, since the candidates are injected
//! into prompts as hints rather than treated as ground truth.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Regex for the two accession shapes: classic 6-character accessions
// (P12345-style) and the longer A0A-prefixed accessions.
static UNIPROT_ACCESSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[PQO][0-9][A-Z0-9]{3}[0-9]\b|\bA0A[A-Z0-9]{6}\b")
        .expect("Should compile: UNIPROT_ACCESSION_RE")
});

/// Scan `text` for tokens shaped like UniProt accessions.
///
/// Returns unique matches in first-occurrence order.
pub fn possible_uniprot_ids(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    UNIPROT_ACCESSION_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
