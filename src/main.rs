//! Locator-Sweep main entry point
//!
//! This is the command-line interface for the Locator-Sweep crawler.

use anyhow::Context;
use clap::Parser;
use locator_sweep::config::{load_config_with_hash, validate, Config};
use locator_sweep::crawler::run_crawl;
use locator_sweep::model::StateKey;
use locator_sweep::output::Progress;
use locator_sweep::url::state_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Locator-Sweep: a store-locator directory crawler
///
/// Walks every state listing of a store-locator site, extracts each city's
/// locations, and writes cities.csv and locations.csv into the output
/// directory.
#[derive(Parser, Debug)]
#[command(name = "locator-sweep")]
#[command(version)]
#[command(about = "Crawl a store-locator directory into CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Crawl only these state codes (comma separated, e.g. ma,ri)
    #[arg(long, value_delimiter = ',', value_name = "CODES")]
    states: Option<Vec<String>>,

    /// Write output files into this directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output and non-error logs
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let progress = if cli.quiet {
        Progress::silent()
    } else {
        Progress::console()
    };

    let outcome = run_crawl(config, progress)
        .await
        .context("Crawl could not persist its results")?;

    if !outcome.failures.is_empty() {
        tracing::warn!(
            "{} states or cities were skipped; see the log above",
            outcome.failures.len()
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("locator_sweep=info,warn"),
            1 => EnvFilter::new("locator_sweep=debug,info"),
            2 => EnvFilter::new("locator_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(codes) = &cli.states {
        config.site.states = codes
            .iter()
            .map(|code| code.parse::<StateKey>())
            .collect::<Result<_, _>>()?;
    }

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Locator-Sweep Dry Run ===\n");

    println!("Site:");
    println!("  Brand: {}", config.site.brand);
    println!("  Origin: {}", config.site.origin);

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    match config.crawler.max_cities_per_state {
        Some(limit) => println!("  Cities per state: first {}", limit),
        None => println!("  Cities per state: all"),
    }
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Cities: {}", config.output.cities_file);
    println!("  Locations: {}", config.output.locations_file);

    println!("\nStates ({}):", config.site.states.len());
    for state in &config.site.states {
        println!("  - {} {}", state.upper(), state_url(&config.site.origin, *state));
    }

    println!("\n✓ Configuration is valid");
}
