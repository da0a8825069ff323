//! Domain reachability monitor.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       DOMAIN MONITOR                         │
//!   │                                                              │
//!   │  ┌───────────┐   ┌──────────┐   ┌──────────────────────┐    │
//!   │  │ scheduler │──▶│ domains  │──▶│ fan-out checker      │    │
//!   │  │ (interval)│   │ (CSV)    │   │  probe ×N (reqwest)  │────┼──▶ https://<domain>
//!   │  └───────────┘   └──────────┘   └──────────┬───────────┘    │
//!   │                                            │ set()          │
//!   │                                            ▼                │
//!   │                                   ┌──────────────────┐      │
//!   │  Client ──▶ http server ─────────▶│ snapshot cache   │      │
//!   │        ◀── JSON / static files ◀──│ (ArcSwap)        │      │
//!   │                                   └──────────────────┘      │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use domain_monitor::config::load_or_default;
use domain_monitor::lifecycle::{signals, startup, Shutdown};
use domain_monitor::observability::{init_logging, metrics};
use domain_monitor::{HttpServer, SnapshotCache};

#[derive(Parser)]
#[command(name = "domain-monitor")]
#[command(about = "Periodically checks domain reachability and serves the results", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long, env = "DOMAIN_MONITOR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        interval_secs = config.checker.interval_secs,
        "domain-monitor starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let cache = Arc::new(SnapshotCache::new());

    // Detached; abandoned when the process exits.
    let _checker = startup::spawn_checker(&config.checker, cache.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(&config, cache);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
