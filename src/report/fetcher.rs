//! Target page fetching
//!
//! One blocking GET per scrape. The whole document must arrive before
//! extraction can start, so any failure here aborts the scrape.

use crate::config::HttpConfig;
use crate::ScrapeError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Redirect hops followed when fetching the target page
const PAGE_MAX_REDIRECTS: usize = 10;

/// Builds the HTTP client used for the target page and enrichment providers
///
/// # Example
///
/// ```no_run
/// use sumi_probe::config::HttpConfig;
/// use sumi_probe::report::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.page_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(PAGE_MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the target page body
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout / DNS / connection refused | `ScrapeError::Fetch` |
/// | Non-2xx final status | `ScrapeError::UpstreamStatus` |
/// | Body cannot be decoded as text | `ScrapeError::Parse` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, ScrapeError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| ScrapeError::Fetch {
            url: url.to_string(),
            message: if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                e.without_url().to_string()
            },
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UpstreamStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if response.url() != url {
        tracing::debug!("{} redirected to {}", url, response.url());
    }

    response.text().await.map_err(|e| ScrapeError::Parse {
        url: url.to_string(),
        message: e.without_url().to_string(),
    })
}
