//! Single-URL reachability probe
//!
//! This module handles one existence check:
//! - HEAD request, with a GET retry when the server rejects HEAD
//! - Manual redirect following with an exact hop budget and loop detection
//! - Error classification into a verdict, never an `Err`

use crate::config::{HttpConfig, LivenessConfig};
use reqwest::{header::LOCATION, redirect::Policy, Client, Response, StatusCode};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Reachability outcome for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessVerdict {
    /// The URL as it was submitted for probing
    pub url: String,

    /// True when the final status code is in `[200, 400)`
    pub reachable: bool,

    /// Last HTTP status received, if any response arrived
    pub status_code: Option<u16>,

    /// Why the URL is considered unreachable
    pub failure_reason: Option<String>,
}

impl LivenessVerdict {
    /// Builds a verdict from the final HTTP status of a probe
    pub fn from_status(url: &str, status: u16) -> Self {
        let reachable = (200..400).contains(&status);
        Self {
            url: url.to_string(),
            reachable,
            status_code: Some(status),
            failure_reason: (!reachable).then(|| format!("HTTP {}", status)),
        }
    }

    /// Builds an unreachable verdict
    pub fn unreachable(url: &str, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            reachable: false,
            status_code: status,
            failure_reason: Some(reason.into()),
        }
    }
}

/// Tuning knobs for a batch of probes
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Redirect hops a probe may follow before giving up
    pub max_redirects: usize,

    /// Retry with GET when HEAD is answered with 405 or 501
    pub get_fallback: bool,

    /// Probes in flight at once
    pub max_concurrent: usize,

    /// Probes in flight against one host, unlimited when `None`
    pub per_host_limit: Option<usize>,
}

impl From<&LivenessConfig> for ProbeOptions {
    fn from(config: &LivenessConfig) -> Self {
        Self {
            max_redirects: config.max_redirects,
            get_fallback: config.get_fallback,
            max_concurrent: config.max_concurrent_probes.max(1),
            per_host_limit: config.per_host_limit,
        }
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::from(&LivenessConfig::default())
    }
}

/// Builds the HTTP client used for probing
///
/// Redirects are disabled on the client because [`probe_url`] follows them
/// itself to enforce the hop budget.
pub fn build_probe_client(
    http: &HttpConfig,
    liveness: &LivenessConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(http.user_agent.clone())
        .timeout(Duration::from_secs(liveness.probe_timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Probes one URL and returns its verdict
///
/// # Request Flow
///
/// 1. Send HEAD (or GET when HEAD is refused and fallback is enabled)
/// 2. On a 3xx with a `Location` header, resolve it and repeat
/// 3. Stop on the first non-redirect status
///
/// | Condition | Verdict |
/// |-----------|---------|
/// | Final status 200-399 | reachable |
/// | Final status >= 400 | unreachable |
/// | Timeout / DNS / connection refused | unreachable |
/// | More than `max_redirects` hops | unreachable |
/// | Redirect revisits a URL | unreachable |
pub async fn probe_url(client: &Client, url: &str, options: &ProbeOptions) -> LivenessVerdict {
    let mut current = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => return LivenessVerdict::unreachable(url, None, format!("Invalid URL: {}", e)),
    };

    let mut visited = HashSet::from([current.to_string()]);
    let mut hops = 0;

    loop {
        let response = match send(client, &current, options.get_fallback).await {
            Ok(response) => response,
            Err(e) => return LivenessVerdict::unreachable(url, None, describe_error(&e)),
        };

        let status = response.status();
        if !status.is_redirection() {
            return LivenessVerdict::from_status(url, status.as_u16());
        }

        let Some(location) = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
        else {
            return LivenessVerdict::from_status(url, status.as_u16());
        };

        if hops >= options.max_redirects {
            return LivenessVerdict::unreachable(
                url,
                Some(status.as_u16()),
                format!("Too many redirects (limit {})", options.max_redirects),
            );
        }

        let next = match current.join(location) {
            Ok(next) => next,
            Err(e) => {
                return LivenessVerdict::unreachable(
                    url,
                    Some(status.as_u16()),
                    format!("Invalid redirect location '{}': {}", location, e),
                )
            }
        };

        if !visited.insert(next.to_string()) {
            return LivenessVerdict::unreachable(
                url,
                Some(status.as_u16()),
                format!("Redirect loop detected at {}", next),
            );
        }

        tracing::trace!("{} redirected to {}", current, next);
        hops += 1;
        current = next;
    }
}

/// Sends one hop of a probe
async fn send(client: &Client, url: &Url, get_fallback: bool) -> Result<Response, reqwest::Error> {
    let response = client.head(url.clone()).send().await?;

    if get_fallback
        && matches!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
        )
    {
        tracing::trace!("HEAD refused by {}, retrying with GET", url);
        return client.get(url.clone()).send().await;
    }

    Ok(response)
}

/// Classifies a transport error into a short reason
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    }
}
