use crate::config::types::{
    Config, DomainAuthorityConfig, EnrichmentConfig, HttpConfig, LivenessConfig, ServerConfig,
};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_http_config(&config.http)?;
    validate_liveness_config(&config.liveness)?;
    validate_enrichment_config(&config.enrichment)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind must be a socket address, got '{}': {}",
            config.bind, e
        ))
    })?;

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.page_timeout_secs < 1 || config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "page-timeout-secs and connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_liveness_config(config: &LivenessConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > 256 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-probes must be between 1 and 256, got {}",
            config.max_concurrent_probes
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    if config.probe_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "probe-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.per_host_limit == Some(0) {
        return Err(ConfigError::Validation(
            "per-host-limit must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_enrichment_config(config: &EnrichmentConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "enrichment timeout-secs must be between 1 and 120, got {}",
            config.timeout_secs
        )));
    }

    if let Some(page_speed) = &config.page_speed {
        validate_endpoint("page-speed", &page_speed.endpoint)?;
    }

    if let Some(authority) = &config.domain_authority {
        validate_domain_authority(authority)?;
    }

    Ok(())
}

fn validate_domain_authority(config: &DomainAuthorityConfig) -> Result<(), ConfigError> {
    validate_endpoint("domain-authority", &config.endpoint)?;

    if config.access_id.is_empty() || config.secret_key.is_empty() {
        return Err(ConfigError::Validation(
            "domain-authority access-id and secret-key cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a provider endpoint is an absolute http(s) URL
fn validate_endpoint(name: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} endpoint: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} endpoint '{}' must use http or https",
            name, endpoint
        )));
    }

    Ok(())
}
