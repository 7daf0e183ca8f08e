//! Sumi-Probe main entry point
//!
//! This is the command-line interface for the Sumi-Probe page inspector.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use sumi_probe::config::{load_config, Config};
use sumi_probe::report::Aggregator;
use tracing_subscriber::EnvFilter;

/// Sumi-Probe: a single-page link and SEO inspector
///
/// Sumi-Probe fetches one page, extracts its headings, links and images,
/// checks every discovered URL for reachability, and reports the results
/// together with optional third-party page-speed and authority metrics.
#[derive(Parser, Debug)]
#[command(name = "sumi-probe")]
#[command(version)]
#[command(about = "A single-page link and SEO inspector", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Override the configured bind address
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Scrape one URL and print the report as JSON
    Scrape {
        /// The page to inspect
        url: String,

        /// Skip page-speed and domain-authority lookups
        #[arg(long)]
        no_enrichment: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Serve { bind } => handle_serve(config, bind).await,
        Command::Scrape { url, no_enrichment } => handle_scrape(config, &url, no_enrichment).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_probe=info,warn"),
            1 => EnvFilter::new("sumi_probe=debug,info"),
            2 => EnvFilter::new("sumi_probe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the `serve` command
async fn handle_serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let aggregator = Arc::new(Aggregator::new(&config)?);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    sumi_probe::server::serve(listener, aggregator).await?;
    Ok(())
}

/// Handles the `scrape` command
async fn handle_scrape(config: Config, url: &str, no_enrichment: bool) -> anyhow::Result<()> {
    let mut aggregator = Aggregator::new(&config)?;
    if no_enrichment {
        aggregator = aggregator.without_enrichment();
    }

    let report = aggregator.scrape(url).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
