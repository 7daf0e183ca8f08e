//! Report module for composing scrape results
//!
//! This module handles:
//! - Fetching the target page
//! - Orchestrating extraction, liveness checking and enrichment
//! - The serialized report returned to callers

mod aggregator;
pub mod enrichment;
mod fetcher;
mod types;

pub use aggregator::Aggregator;
pub use enrichment::{EnrichmentData, Enricher, Strategy};
pub use fetcher::{build_http_client, fetch_page};
pub use types::ScrapeReport;
