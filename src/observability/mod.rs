//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! controller and queue produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (write counters, service/queue gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Per-event faults are observable only through logs; intake never errors
//! - Metrics are cheap (atomic increments) and no-ops until the exporter
//!   is installed, so tests and library users pay nothing

pub mod logging;
pub mod metrics;
