use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;

use domain_monitor::config::validation::validate_config;
use domain_monitor::config::{CheckerConfig, DomainMonitorConfig};
use domain_monitor::lifecycle::startup::build_scheduler;
use domain_monitor::monitor::{CycleOutcome, DomainCheckResult};
use domain_monitor::SnapshotCache;

#[derive(Parser)]
#[command(name = "domain-cli")]
#[command(about = "Query a running domain monitor or run a one-off check", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the latest published results
    Results,
    /// Print service status (domain count, last update)
    Status,
    /// Check the domains in a CSV file once, without a server
    Check {
        /// CSV file with a header row and domains in the first column
        #[arg(short, long, default_value = "./domains.csv")]
        domains: PathBuf,

        /// Per-probe timeout in seconds
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,

        /// Maximum probes in flight
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_concurrency: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Results => fetch(&format!("{}/api/check", cli.url)).await?,
        Commands::Status => fetch(&format!("{}/api/status", cli.url)).await?,
        Commands::Check {
            domains,
            timeout,
            max_concurrency,
        } => {
            let mut results = check_once(domains, timeout, max_concurrency).await?;
            results.sort_by(|a, b| a.domain().cmp(b.domain()));
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

async fn fetch(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let res = reqwest::get(url).await?;
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Run a single scheduler cycle against `path` and return what it published.
async fn check_once(
    path: PathBuf,
    timeout: u64,
    max_concurrency: Option<u64>,
) -> Result<Vec<DomainCheckResult>, Box<dyn std::error::Error>> {
    let checker = CheckerConfig {
        domains_path: path,
        timeout_secs: timeout,
        max_concurrency: max_concurrency.map(usize::try_from).transpose()?,
        ..CheckerConfig::default()
    };

    let config = DomainMonitorConfig {
        checker,
        ..DomainMonitorConfig::default()
    };
    if let Err(errors) = validate_config(&config) {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(messages.join("; ").into());
    }

    let cache = Arc::new(SnapshotCache::new());
    let scheduler = build_scheduler(&config.checker, cache.clone())?;

    match scheduler.run_cycle().await {
        CycleOutcome::Published { .. } => Ok(cache.get()),
        CycleOutcome::Empty => Err("no domains to check".into()),
        CycleOutcome::SourceFailed(e) => Err(e.into()),
    }
}
