//! Metrics collection and exposition.
//!
//! # Metrics
//! - `domain_probes_total` (counter): probes by outcome (up, down, error)
//! - `domain_probe_duration_seconds` (histogram): time per probe
//! - `domain_check_cycles_total` (counter): cycles by result
//! - `domain_snapshot_size` (gauge): results in the published snapshot
//! - `domain_snapshot_up` (gauge): reachable domains in the published snapshot
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::monitor::result::DomainCheckResult;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one probe.
pub fn record_probe(result: &DomainCheckResult, start: Instant) {
    let outcome = match (result.is_up(), result.error()) {
        (true, _) => "up",
        (false, None) => "down",
        (false, Some(_)) => "error",
    };
    counter!("domain_probes_total", "outcome" => outcome).increment(1);
    histogram!("domain_probe_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record how a check cycle ended.
pub fn record_cycle(result: &'static str) {
    counter!("domain_check_cycles_total", "result" => result).increment(1);
}

/// Record the shape of a freshly published snapshot.
pub fn record_snapshot(size: usize, up: usize) {
    gauge!("domain_snapshot_size").set(size as f64);
    gauge!("domain_snapshot_up").set(up as f64);
}
