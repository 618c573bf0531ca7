//! Tests that exercise a real LLM backend. Run with:
//!
//! ```sh
//! cargo test --features integration -- --ignored
//! ```
//!
//! Requires `GEMINI_API_KEY` (or a populated `.env`).

#![cfg(feature = "integration")]

use kinex::config::Config;
use kinex::extract::{RelationKind, extract_relationships};

#[tokio::test]
#[ignore = "hits a live backend and spends tokens"]
async fn test_live_extraction_round_trip() {
    dotenv::dotenv().ok();

    let config = Config::default();
    let text = "In our assays, CDK1 phosphorylated Histone H1 in vitro, \
                while CASP3 cleaved PARP1 during apoptosis.";

    let outcome =
        extract_relationships(&config, "gemini_15_flash", RelationKind::EnzymeSubstrate, text)
            .await
            .expect("Live extraction should succeed");

    let pairs = outcome.pairs.expect("Should find at least one pair");
    assert!(!pairs.is_empty());
    assert!(outcome.total_usage > 0);
}
