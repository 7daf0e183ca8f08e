//! Scrape orchestration
//!
//! Sequences one scrape:
//! 1. Validate the target URL
//! 2. Fetch the page (fatal on failure)
//! 3. Parse and extract (no I/O)
//! 4. Check liveness of every discovered URL and run enrichment, concurrently
//! 5. Compose the report
//!
//! The whole sequence runs under the request deadline. When the deadline
//! passes, or the caller drops the future, every in-flight probe and
//! enrichment call is dropped with it.

use crate::config::{validate, Config};
use crate::extract::{extract_with, ExtractionResult, ParsedDocument};
use crate::liveness::LivenessChecker;
use crate::report::enrichment::{EnrichmentData, Enricher};
use crate::report::fetcher::{build_http_client, fetch_page};
use crate::report::types::ScrapeReport;
use crate::url::{validate_target_url, PublicSuffixList, RegistrableDomain};
use crate::ScrapeError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds scrape reports from immutable configuration
///
/// An aggregator holds no per-request state and can be shared across
/// concurrent requests behind an `Arc`.
pub struct Aggregator {
    client: Client,
    checker: LivenessChecker,
    enricher: Option<Enricher>,
    resolver: Arc<dyn RegistrableDomain>,
    request_timeout: Duration,
}

impl Aggregator {
    /// Creates an aggregator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Aggregator)` - Ready to scrape
    /// * `Err(ScrapeError::Config)` - The configuration failed validation
    /// * `Err(ScrapeError)` - An HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        validate(config)?;

        let client = build_http_client(&config.http)?;
        let checker = LivenessChecker::new(&config.http, &config.liveness)?;
        let enricher = Enricher::new(client.clone(), config.enrichment.clone());

        Ok(Self {
            client,
            checker,
            enricher: enricher.is_enabled().then_some(enricher),
            resolver: Arc::new(PublicSuffixList),
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        })
    }

    /// Replaces the registrable-domain resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn RegistrableDomain>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Disables all enrichment providers
    pub fn without_enrichment(mut self) -> Self {
        self.enricher = None;
        self
    }

    /// Scrapes a submitted URL end to end
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - The composed report; probe and enrichment
    ///   failures are recorded inside it
    /// * `Err(ScrapeError::InvalidInput)` - `raw_url` is not an absolute http(s) URL
    /// * `Err(ScrapeError)` - The page could not be fetched or read, or the
    ///   request deadline passed
    pub async fn scrape(&self, raw_url: &str) -> Result<ScrapeReport, ScrapeError> {
        let target = validate_target_url(raw_url)
            .map_err(|e| ScrapeError::InvalidInput(e.to_string()))?;

        tracing::info!("Scraping {}", target);
        let start_time = std::time::Instant::now();

        let report = tokio::time::timeout(
            self.request_timeout,
            self.scrape_target(raw_url.trim(), &target),
        )
        .await
        .map_err(|_| ScrapeError::Timeout {
            url: target.to_string(),
        })??;

        tracing::info!(
            "Scraped {} in {:?}: {} internal, {} external, {} images, {} broken",
            target,
            start_time.elapsed(),
            report.internal_links.len(),
            report.external_links.len(),
            report.images.as_ref().map_or(0, Vec::len),
            report.broken_links.len()
        );

        Ok(report)
    }

    async fn scrape_target(
        &self,
        submitted: &str,
        target: &Url,
    ) -> Result<ScrapeReport, ScrapeError> {
        let body = fetch_page(&self.client, target).await?;
        let extraction = self.extract_page(&body, target);
        Ok(self.complete_report(extraction, submitted, target).await)
    }

    /// Parses a page body and extracts it against `base_url`
    ///
    /// The parsed document is dropped before this returns.
    pub fn extract_page(&self, body: &str, base_url: &Url) -> ExtractionResult {
        let doc = ParsedDocument::parse(body);
        extract_with(&doc, base_url, self.resolver.as_ref())
    }

    /// Builds a report from an already parsed document
    pub async fn build_report(&self, doc: &ParsedDocument, base_url: &Url) -> ScrapeReport {
        let extraction = extract_with(doc, base_url, self.resolver.as_ref());
        self.complete_report(extraction, base_url.as_str(), base_url).await
    }

    /// Runs liveness checking and enrichment, then composes the report
    pub async fn complete_report(
        &self,
        extraction: ExtractionResult,
        submitted: &str,
        target: &Url,
    ) -> ScrapeReport {
        let candidates = extraction.candidate_urls();

        let (verdicts, enrichment) =
            tokio::join!(self.checker.check_all(&candidates), self.enrich(target));

        let report = ScrapeReport::new(extraction, verdicts, submitted, enrichment);
        if !report.broken_links.is_empty() {
            tracing::warn!(
                "{} of {} links on {} are broken",
                report.broken_links.len(),
                candidates.len(),
                target
            );
        }

        report
    }

    async fn enrich(&self, target: &Url) -> EnrichmentData {
        match &self.enricher {
            Some(enricher) => enricher.enrich(target).await,
            None => EnrichmentData::default(),
        }
    }
}
