//! Route controller subsystem.
//!
//! # Data Flow
//! ```text
//! route discovery (any task)
//!     → intake operations (update/remove pool endpoints, virtual servers)
//!     → work.rs (typed work items)
//!     → queue (de-duplicated FIFO)
//!     → worker.rs (single consumer: mutate indices, track dirty flag)
//!     → on drain: policy.rs + rules.rs assemble the document
//!     → writer (length-verified emission)
//! ```
//!
//! # Design Decisions
//! - Intake is fire-and-forget; per-event faults are logged, never returned
//! - One worker owns all indices; no locks on the mutation path
//! - Bursts collapse into a single write: emission happens only when the
//!   queue is drained and something actually changed
//! - Shutdown discards queued work; no final emission

pub mod policy;
pub mod rules;
pub mod work;
mod worker;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, oneshot, Mutex};

use crate::config::RouterConfig;
use crate::device::{ConfigDocument, GlobalSection};
use crate::observability::metrics;
use crate::queue::WorkQueue;
use crate::writer::ConfigWriter;

pub use work::{Endpoint, VirtualServerType};

use work::{Op, PoolData, VirtualData, WorkItem, WorkPayload};
use worker::WorkerState;

/// Name of the HTTP routing virtual server.
pub const HTTP_ROUTER_NAME: &str = "routing-vip-http";
/// Name of the HTTPS routing virtual server.
pub const HTTPS_ROUTER_NAME: &str = "routing-vip-https";
/// Name of the generated routing policy.
pub const CF_ROUTING_POLICY_NAME: &str = "cf-routing-policy";

/// Errors that can occur while emitting configuration.
///
/// Only the constructor surfaces these to callers; at runtime a failed
/// emission is logged and retried on the next drain.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The configuration names no partition to write into.
    #[error("bigip.partitions must contain at least one partition")]
    NoPartitions,

    /// The document failed to serialize.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The writer rejected the document.
    #[error("failed to write configuration: {0}")]
    Write(#[from] std::io::Error),

    /// The writer accepted fewer bytes than the document holds.
    #[error("short write to configuration sink: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// Controller translating route events into device configuration documents.
pub struct RouteController {
    config: Arc<RouterConfig>,
    queue: Arc<WorkQueue<WorkItem>>,
    /// Worker-exclusive state; `run` holds the lock for its whole lifetime.
    state: Mutex<WorkerState>,
}

impl RouteController {
    /// Create the controller and write the initial document.
    ///
    /// The initial document carries only the `global` and `bigip` sections;
    /// a failure here is fatal.
    pub fn new(
        config: Arc<RouterConfig>,
        mut writer: Box<dyn ConfigWriter>,
    ) -> Result<Self, ControllerError> {
        // every record and rule is written into partitions[0]
        if config.bigip.partitions.is_empty() {
            return Err(ControllerError::NoPartitions);
        }

        write_initial_config(&config, writer.as_mut())?;

        Ok(Self {
            config,
            queue: Arc::new(WorkQueue::new()),
            state: Mutex::new(WorkerState::new(writer)),
        })
    }

    /// Drive the worker until a shutdown signal arrives.
    ///
    /// `ready` fires once the worker owns its state and is consuming the
    /// queue. On signal the queue is shut down and queued work is discarded;
    /// no final document is written.
    pub async fn run(
        &self,
        mut signals: broadcast::Receiver<()>,
        ready: oneshot::Sender<()>,
    ) -> Result<(), ControllerError> {
        tracing::info!("route controller starting");

        let queue = Arc::clone(&self.queue);
        let watcher = tokio::spawn(async move {
            let _ = signals.recv().await;
            queue.shut_down();
        });

        let mut state = self.state.lock().await;
        let _ = ready.send(());

        while self.process(&mut state).await {}

        let _ = watcher.await;
        tracing::info!("route controller exited");
        Ok(())
    }

    /// Process one work item; returns false once the queue signals quit.
    async fn process(&self, state: &mut WorkerState) -> bool {
        let item = match self.queue.get().await {
            Some(item) => item,
            None => {
                tracing::debug!("quit signal received");
                return false;
            }
        };

        if state.apply(&self.config, &item) {
            state.drain_update = true;
        }

        let pending = self.queue.len();
        metrics::record_queue_depth(pending);

        if state.drain_update && pending == 0 {
            match state.write_config(&self.config) {
                Ok(services) => {
                    state.drain_update = false;
                    metrics::record_config_write(services);
                    tracing::debug!(services, "configuration written");
                }
                Err(e) => {
                    metrics::record_config_write_failure();
                    tracing::warn!(error = %e, "configuration write failed");
                }
            }
        } else {
            tracing::debug!(update = state.drain_update, pending, "write not ready");
        }

        self.queue.forget(&item);
        self.queue.done(&item);
        true
    }

    /// Register an endpoint for a route, creating the pool on first sight.
    pub fn update_pool_endpoints(&self, uri: &str, endpoint: &Endpoint) {
        tracing::debug!(uri, endpoint = %endpoint.canonical_addr(), "updating pool");
        self.queue.add(WorkItem {
            op: Op::Add,
            payload: WorkPayload::Pool(PoolData::for_uri(uri, endpoint)),
        });
    }

    /// Drop an endpoint from a route's pool; the pool and its rule go away
    /// with the last endpoint.
    pub fn remove_pool_endpoints(&self, uri: &str, endpoint: &Endpoint) {
        tracing::debug!(uri, endpoint = %endpoint.canonical_addr(), "removing pool endpoint");
        self.queue.add(WorkItem {
            op: Op::Remove,
            payload: WorkPayload::Pool(PoolData::for_uri(uri, endpoint)),
        });
    }

    /// Create or replace a routing virtual server.
    pub fn update_virtual_server(&self, name: &str, kind: VirtualServerType) {
        tracing::debug!(name, %kind, "updating virtual server");
        self.queue.add(WorkItem {
            op: Op::Add,
            payload: WorkPayload::Virtual(VirtualData {
                name: name.to_string(),
                kind,
            }),
        });
    }

    /// Delete a routing virtual server.
    pub fn remove_virtual_server(&self, name: &str, kind: VirtualServerType) {
        tracing::debug!(name, %kind, "removing virtual server");
        self.queue.add(WorkItem {
            op: Op::Remove,
            payload: WorkPayload::Virtual(VirtualData {
                name: name.to_string(),
                kind,
            }),
        });
    }

    /// Current number of queued work items.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

fn write_initial_config(
    config: &RouterConfig,
    writer: &mut dyn ConfigWriter,
) -> Result<(), ControllerError> {
    let document = ConfigDocument {
        bigip: config.bigip.clone(),
        global: GlobalSection {
            log_level: config.logging.level.clone(),
            verify_interval: config.bigip.verify_interval,
        },
        policies: None,
        services: None,
    };

    let output = serde_json::to_vec(&document)?;
    let written = writer.write(&output)?;
    if written != output.len() {
        return Err(ControllerError::ShortWrite {
            written,
            expected: output.len(),
        });
    }
    Ok(())
}
