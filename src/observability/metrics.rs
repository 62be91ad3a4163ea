//! Metrics collection and exposition.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize metrics exporter and server.
pub fn init_metrics(addr: SocketAddr) {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus recorder");

    tracing::info!("Metrics server listening on http://{}", addr);
}

/// Record a successful configuration write.
pub fn record_config_write(services: usize) {
    counter!("router_config_writes_total").increment(1);
    gauge!("router_config_services").set(services as f64);
}

/// Record a failed configuration write.
pub fn record_config_write_failure() {
    counter!("router_config_write_failures_total").increment(1);
}

/// Record the current work queue depth.
pub fn record_queue_depth(depth: usize) {
    gauge!("router_queue_depth").set(depth as f64);
}
