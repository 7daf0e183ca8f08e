//! Configuration module for Sumi-Probe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so an empty file (or no file) is a valid config.
//!
//! # Example
//!
//! ```no_run
//! use sumi_probe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sumi-probe.toml")).unwrap();
//! println!("Probing with {} workers", config.liveness.max_concurrent_probes);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DomainAuthorityConfig, EnrichmentConfig, HttpConfig, LivenessConfig,
    PageSpeedConfig, ServerConfig,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
