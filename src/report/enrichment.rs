//! Third-party metrics enrichment
//!
//! Page-speed scores (mobile and desktop) and a domain-authority lookup.
//! Provider responses are passed through untouched. Every call is optional
//! and bounded by a timeout; a failure only blanks its own report field.

use crate::config::EnrichmentConfig;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// Device strategy for page-speed scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// Raw provider payloads, `None` where a provider is unconfigured or failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentData {
    pub mobile_metrics: Option<Value>,
    pub desktop_metrics: Option<Value>,
    pub domain_authority: Option<Value>,
}

/// Client for the configured enrichment providers
#[derive(Debug, Clone)]
pub struct Enricher {
    client: Client,
    config: EnrichmentConfig,
}

impl Enricher {
    pub fn new(client: Client, config: EnrichmentConfig) -> Self {
        Self { client, config }
    }

    /// Returns true if at least one provider is configured
    pub fn is_enabled(&self) -> bool {
        self.config.page_speed.is_some() || self.config.domain_authority.is_some()
    }

    /// Runs all provider calls concurrently
    pub async fn enrich(&self, target: &Url) -> EnrichmentData {
        let (mobile_metrics, desktop_metrics, domain_authority) = tokio::join!(
            self.page_speed(target, Strategy::Mobile),
            self.page_speed(target, Strategy::Desktop),
            self.domain_authority(target),
        );

        EnrichmentData {
            mobile_metrics,
            desktop_metrics,
            domain_authority,
        }
    }

    /// `GET {endpoint}?url=…&strategy=…[&key=…]`
    pub async fn page_speed(&self, target: &Url, strategy: Strategy) -> Option<Value> {
        let provider = self.config.page_speed.as_ref()?;

        let mut request = self
            .client
            .get(&provider.endpoint)
            .query(&[("url", target.as_str()), ("strategy", strategy.as_str())]);
        if let Some(key) = &provider.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        self.fetch_json(&format!("page-speed ({})", strategy.as_str()), request)
            .await
    }

    /// `POST {endpoint}` with basic auth and `{"targets": [target]}`
    pub async fn domain_authority(&self, target: &Url) -> Option<Value> {
        let provider = self.config.domain_authority.as_ref()?;

        let request = self
            .client
            .post(&provider.endpoint)
            .basic_auth(&provider.access_id, Some(&provider.secret_key))
            .json(&json!({ "targets": [target.as_str()] }));

        self.fetch_json("domain-authority", request).await
    }

    /// Sends a request and decodes a JSON body, degrading every failure to `None`
    async fn fetch_json(&self, provider: &str, request: RequestBuilder) -> Option<Value> {
        let timeout = Duration::from_secs(self.config.timeout_secs);

        let call = async {
            let response = request.send().await?.error_for_status()?;
            response.json::<Value>().await
        };

        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(value)) => {
                tracing::debug!("{} enrichment succeeded", provider);
                Some(value)
            }
            Ok(Err(e)) => {
                // Provider URLs may carry API keys in the query string
                tracing::warn!("{} enrichment failed: {}", provider, e.without_url());
                None
            }
            Err(_) => {
                tracing::warn!("{} enrichment timed out after {:?}", provider, timeout);
                None
            }
        }
    }
}
