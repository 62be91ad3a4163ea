//! Route-to-BigIP controller library.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               ROUTE CONTROLLER                │
//!                        │                                              │
//!   route events         │  ┌──────────┐   ┌─────────┐   ┌──────────┐  │
//!   ─────────────────────┼─▶│  intake  │──▶│  queue  │──▶│  worker  │  │
//!   (update/remove pool  │  │(fire-and-│   │(dedup + │   │ (single  │  │
//!    endpoints, virtual  │  │  forget) │   │shutdown)│   │ consumer)│  │
//!    servers)            │  └──────────┘   └─────────┘   └────┬─────┘  │
//!                        │                                    │        │
//!                        │                       on drain     ▼        │
//!                        │  ┌────────────────────────────────────────┐ │
//!                        │  │ rules + policy assembly → document     │ │
//!                        │  │ (sorted rules, ordinals, services)     │ │
//!                        │  └────────────────────┬───────────────────┘ │
//!   device driver        │                       ▼                     │
//!   ◀────────────────────┼───────────── ConfigWriter (length-verified) │
//!                        │                                              │
//!                        │  ┌────────────────────────────────────────┐ │
//!                        │  │          Cross-Cutting Concerns        │ │
//!                        │  │  config · observability · lifecycle    │ │
//!                        │  └────────────────────────────────────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```
//!
//! The controller keeps three mutually consistent indices (pools, exact
//! rules, wildcard rules) and batches bursts of route events into single
//! coherent writes of a full JSON configuration document.

// Core subsystems
pub mod config;
pub mod controller;
pub mod device;
pub mod queue;
pub mod writer;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RouterConfig;
pub use controller::{Endpoint, RouteController, VirtualServerType};
pub use lifecycle::ShutdownSignal;
pub use writer::{ConfigWriter, FileConfigWriter};
