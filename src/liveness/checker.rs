//! Concurrent batch liveness checking
//!
//! Every URL gets its own probe future. Futures run under a global
//! concurrency cap and, optionally, a per-host cap. The batch waits for all of
//! them; a failed probe only ever produces an unreachable verdict.
//!
//! Probes are plain futures, not spawned tasks, so dropping the batch future
//! cancels every probe still in flight.

use crate::config::{HttpConfig, LivenessConfig};
use crate::liveness::probe::{build_probe_client, probe_url, LivenessVerdict, ProbeOptions};
use crate::url::extract_domain;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Probes a set of URLs concurrently
///
/// Input order is preserved in the output, duplicates are probed once, and
/// exactly one verdict is returned per distinct URL.
pub async fn check_all(
    client: &Client,
    urls: &[String],
    options: &ProbeOptions,
) -> Vec<LivenessVerdict> {
    let mut seen = HashSet::new();
    let urls: Vec<String> = urls
        .iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect();

    if urls.is_empty() {
        return Vec::new();
    }

    let host_limits = host_semaphores(&urls, options.per_host_limit);

    tracing::debug!(
        "Probing {} URLs with up to {} in flight",
        urls.len(),
        options.max_concurrent
    );

    let mut verdicts: Vec<(usize, LivenessVerdict)> = stream::iter(urls.into_iter().enumerate())
        .map(|(index, url)| {
            let host_limit = host_of(&url).and_then(|host| host_limits.get(&host).cloned());
            async move {
                let _permit = match host_limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let verdict = probe_url(client, &url, options).await;
                if verdict.reachable {
                    tracing::debug!("{} is reachable ({:?})", url, verdict.status_code);
                } else {
                    tracing::debug!(
                        "{} is unreachable: {}",
                        url,
                        verdict.failure_reason.as_deref().unwrap_or("unknown")
                    );
                }

                (index, verdict)
            }
        })
        .buffer_unordered(options.max_concurrent.max(1))
        .collect()
        .await;

    verdicts.sort_by_key(|(index, _)| *index);
    verdicts.into_iter().map(|(_, verdict)| verdict).collect()
}

/// URLs judged unreachable, in verdict order
pub fn broken_links(verdicts: &[LivenessVerdict]) -> Vec<String> {
    verdicts
        .iter()
        .filter(|verdict| !verdict.reachable)
        .map(|verdict| verdict.url.clone())
        .collect()
}

/// Builds one semaphore per host when a per-host limit is configured
fn host_semaphores(urls: &[String], limit: Option<usize>) -> HashMap<String, Arc<Semaphore>> {
    let Some(limit) = limit else {
        return HashMap::new();
    };

    urls.iter()
        .filter_map(|url| host_of(url))
        .map(|host| (host, Arc::new(Semaphore::new(limit.max(1)))))
        .collect()
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(extract_domain)
}

/// Liveness checker bound to a configured probe client
#[derive(Debug, Clone)]
pub struct LivenessChecker {
    client: Client,
    options: ProbeOptions,
}

impl LivenessChecker {
    /// Creates a checker from configuration
    pub fn new(http: &HttpConfig, liveness: &LivenessConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_probe_client(http, liveness)?,
            options: ProbeOptions::from(liveness),
        })
    }

    /// Probes every URL, see [`check_all`]
    pub async fn check_all(&self, urls: &[String]) -> Vec<LivenessVerdict> {
        check_all(&self.client, urls, &self.options).await
    }
}
