//! Metrics collection and exposition.
//!
//! # Metrics
//! - `utg_relay_requests_total` (counter): requests by route and status
//! - `utg_relay_request_duration_seconds` (histogram): time to response head
//!
//! Routes are `relay`, `preflight` and `terminal_id`. Recording is a no-op
//! until `init_metrics` installs the Prometheus exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const ROUTE_RELAY: &str = "relay";
pub const ROUTE_PREFLIGHT: &str = "preflight";
pub const ROUTE_TERMINAL_ID: &str = "terminal_id";

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one served request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "utg_relay_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("utg_relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
