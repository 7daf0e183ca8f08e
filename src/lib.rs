//! Sumi-Probe: a single-page link and SEO inspector
//!
//! This crate fetches one page, extracts its metadata, headings, links and
//! images, checks every discovered URL for reachability, and composes the
//! results (plus optional third-party metrics) into a single report.

pub mod config;
pub mod extract;
pub mod liveness;
pub mod report;
pub mod seo;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Probe operations
///
/// Only failures that abort a whole scrape live here. Per-link probe failures
/// and enrichment failures are recorded as values in the report instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid target URL: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Failed to read document from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Scrape of {url} timed out")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScrapeError {
    /// Returns true if the caller supplied bad input (maps to HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract, ExtractionResult, ParsedDocument};
pub use liveness::{check_all, LivenessChecker, LivenessVerdict};
pub use report::{Aggregator, ScrapeReport};
pub use crate::url::{classify, is_candidate_link, normalize, LinkCategory};
