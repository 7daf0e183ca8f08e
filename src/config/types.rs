use serde::Deserialize;

/// Main configuration structure for Sumi-Probe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub liveness: LivenessConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Inbound HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on
    pub bind: String,

    /// Deadline for a whole scrape request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3001".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every outbound request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for fetching the target page (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("sumi-probe/{}", env!("CARGO_PKG_VERSION")),
            page_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Link liveness checking configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Maximum number of probes in flight at once
    #[serde(rename = "max-concurrent-probes")]
    pub max_concurrent_probes: usize,

    /// Maximum number of redirect hops a probe follows
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Timeout for a single probe request (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Retry a hop with GET when the server rejects HEAD (405/501)
    #[serde(rename = "get-fallback")]
    pub get_fallback: bool,

    /// Optional cap on concurrent probes against the same host
    #[serde(rename = "per-host-limit")]
    pub per_host_limit: Option<usize>,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            max_concurrent_probes: 16,
            max_redirects: 5,
            probe_timeout_secs: 15,
            get_fallback: true,
            per_host_limit: None,
        }
    }
}

/// Third-party metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Timeout for each enrichment call (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Page-speed provider; mobile and desktop metrics are null without it
    #[serde(rename = "page-speed")]
    pub page_speed: Option<PageSpeedConfig>,

    /// Domain-authority provider; authority data is null without it
    #[serde(rename = "domain-authority")]
    pub domain_authority: Option<DomainAuthorityConfig>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            page_speed: None,
            domain_authority: None,
        }
    }
}

/// Page-speed scoring endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PageSpeedConfig {
    pub endpoint: String,

    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,
}

/// Domain-authority lookup endpoint and credentials
#[derive(Debug, Clone, Deserialize)]
pub struct DomainAuthorityConfig {
    pub endpoint: String,

    #[serde(rename = "access-id")]
    pub access_id: String,

    #[serde(rename = "secret-key")]
    pub secret_key: String,
}
