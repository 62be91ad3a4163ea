//! Event processor state: index mutation and drain-time emission.
//!
//! All three indices live here and are touched by exactly one task (the
//! worker loop in `controller::mod`). Mutations report whether they changed
//! anything so the loop can maintain the drain-dirty flag.

use std::collections::{BTreeMap, HashMap};

use crate::config::RouterConfig;
use crate::controller::policy::{make_route_policy, make_virtual_policy_list, parse_name_list};
use crate::controller::rules::make_route_rule;
use crate::controller::work::{Op, PoolData, VirtualData, VirtualServerType, WorkItem, WorkPayload};
use crate::controller::{ControllerError, HTTPS_ROUTER_NAME, HTTP_ROUTER_NAME};
use crate::device::{
    Backend, ConfigDocument, Frontend, GlobalSection, RouteConfig, RouteItem, Rule, SslProfile,
    VirtualAddress,
};
use crate::writer::ConfigWriter;

pub(crate) struct WorkerState {
    /// Pool name → service record. Ordered so `services` emission is stable.
    pub(crate) pools: BTreeMap<String, RouteConfig>,
    /// Exact-match URI → rule.
    pub(crate) rules: HashMap<String, Rule>,
    /// Stripped wildcard URI → rule.
    pub(crate) wildcard_rules: HashMap<String, Rule>,
    /// At least one mutation since the last successful emission.
    pub(crate) drain_update: bool,
    writer: Box<dyn ConfigWriter>,
}

impl WorkerState {
    pub(crate) fn new(writer: Box<dyn ConfigWriter>) -> Self {
        Self {
            pools: BTreeMap::new(),
            rules: HashMap::new(),
            wildcard_rules: HashMap::new(),
            drain_update: false,
            writer,
        }
    }

    /// Apply one work item; returns whether state changed.
    pub(crate) fn apply(&mut self, config: &RouterConfig, item: &WorkItem) -> bool {
        match &item.payload {
            WorkPayload::Pool(pool) => {
                tracing::debug!(pool = %pool.name, op = ?item.op, "pool request received");
                match item.op {
                    Op::Add => self.process_pool_add(config, pool),
                    Op::Remove => self.process_pool_remove(pool),
                }
            }
            WorkPayload::Virtual(virtual_server) => {
                tracing::debug!(
                    virtual_server = %virtual_server.name,
                    op = ?item.op,
                    "virtual server request received"
                );
                match item.op {
                    Op::Add => self.process_virtual_add(config, virtual_server),
                    Op::Remove => self.process_virtual_remove(virtual_server),
                }
            }
        }
    }

    fn process_pool_add(&mut self, config: &RouterConfig, pool: &PoolData) -> bool {
        if let Some(record) = self.pools.get_mut(&pool.name) {
            let addrs = &mut record.item.backend.pool_member_addrs;
            if addrs.iter().any(|addr| addr == &pool.endpoint) {
                tracing::debug!(
                    pool = %pool.name,
                    endpoint = %pool.endpoint,
                    "pool endpoint already present"
                );
                return false;
            }
            addrs.push(pool.endpoint.clone());
            tracing::debug!(pool = %pool.name, endpoint = %pool.endpoint, "pool updated");
            return true;
        }

        let rule = match make_route_rule(&config.bigip.partitions[0], pool) {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!(uri = %pool.uri, error = %e, "dropping add, rule build failed");
                return false;
            }
        };

        if pool.wildcard {
            self.wildcard_rules.insert(pool.uri.clone(), rule);
            tracing::debug!(name = %pool.name, uri = %pool.uri, "wildcard rule created");
        } else {
            self.rules.insert(pool.uri.clone(), rule);
            tracing::debug!(name = %pool.name, uri = %pool.uri, "app rule created");
        }

        let record = make_pool(config, &pool.name, &pool.uri, &pool.endpoint);
        self.pools.insert(pool.name.clone(), record);
        tracing::debug!(pool = %pool.name, "pool created");
        true
    }

    fn process_pool_remove(&mut self, pool: &PoolData) -> bool {
        let Some(record) = self.pools.get_mut(&pool.name) else {
            tracing::debug!(pool = %pool.name, "pool not found");
            return false;
        };

        let addrs = &mut record.item.backend.pool_member_addrs;
        let Some(position) = addrs.iter().position(|addr| addr == &pool.endpoint) else {
            tracing::debug!(
                pool = %pool.name,
                endpoint = %pool.endpoint,
                "endpoint not in pool"
            );
            return false;
        };
        addrs.remove(position);
        tracing::debug!(pool = %pool.name, endpoint = %pool.endpoint, "pool endpoint removed");

        if addrs.is_empty() {
            self.pools.remove(&pool.name);
            tracing::debug!(pool = %pool.name, "pool removed");

            if pool.wildcard {
                self.wildcard_rules.remove(&pool.uri);
                tracing::debug!(name = %pool.name, uri = %pool.uri, "wildcard rule removed");
            } else {
                self.rules.remove(&pool.uri);
                tracing::debug!(name = %pool.name, uri = %pool.uri, "app rule removed");
            }
        }
        true
    }

    fn process_virtual_add(&mut self, config: &RouterConfig, virtual_server: &VirtualData) -> bool {
        let record = make_virtual(config, &virtual_server.name, virtual_server.kind);
        self.pools.insert(virtual_server.name.clone(), record);
        tracing::debug!(virtual_server = %virtual_server.name, "virtual server updated");
        true
    }

    fn process_virtual_remove(&mut self, virtual_server: &VirtualData) -> bool {
        self.pools.remove(&virtual_server.name);
        tracing::debug!(virtual_server = %virtual_server.name, "virtual server removed");
        true
    }

    /// Assemble and emit the full document through the writer.
    ///
    /// Returns the number of service records emitted. The virtual-server
    /// records pick up the current policy and profile lists right before
    /// serialization so they always reference the policy being emitted.
    pub(crate) fn write_config(&mut self, config: &RouterConfig) -> Result<usize, ControllerError> {
        let policy = make_route_policy(config, &self.rules, &self.wildcard_rules, self.pools.len());

        let policy_refs = make_virtual_policy_list(config);
        let profile_refs = parse_name_list(&config.bigip.profiles);
        for name in [HTTP_ROUTER_NAME, HTTPS_ROUTER_NAME] {
            if let Some(virtual_server) = self.pools.get_mut(name) {
                virtual_server.item.frontend.policies = Some(policy_refs.clone());
                virtual_server.item.frontend.profiles = Some(profile_refs.clone());
            }
        }

        let services: Vec<RouteConfig> = self.pools.values().cloned().collect();
        let count = services.len();

        let document = ConfigDocument {
            bigip: config.bigip.clone(),
            global: GlobalSection {
                log_level: config.logging.level.clone(),
                verify_interval: config.bigip.verify_interval,
            },
            policies: Some(vec![policy]),
            services: Some(services),
        };

        let output = serde_json::to_vec(&document)?;
        let written = self.writer.write(&output)?;
        if written != output.len() {
            return Err(ControllerError::ShortWrite {
                written,
                expected: output.len(),
            });
        }
        Ok(count)
    }
}

/// Create a pool-only service record with one endpoint.
fn make_pool(config: &RouterConfig, name: &str, uri: &str, addr: &str) -> RouteConfig {
    RouteConfig {
        item: RouteItem {
            backend: Backend {
                service_name: uri.to_string(),
                service_port: -1, // unused
                pool_member_addrs: vec![addr.to_string()],
            },
            frontend: Frontend {
                name: name.to_string(),
                partition: config.bigip.partitions[0].clone(),
                balance: config.bigip.balance.clone(),
                mode: "http".to_string(),
                policies: None,
                profiles: None,
                virtual_address: None,
                ssl_profile: None,
            },
        },
    }
}

/// Create a virtual-server service record.
fn make_virtual(config: &RouterConfig, name: &str, kind: VirtualServerType) -> RouteConfig {
    let (port, ssl_profile) = match kind {
        VirtualServerType::Http => (80, None),
        VirtualServerType::Https => (
            443,
            Some(SslProfile {
                profile_name: config.bigip.ssl_profile.clone(),
            }),
        ),
    };

    RouteConfig {
        item: RouteItem {
            backend: Backend {
                service_name: name.to_string(),
                service_port: -1,            // unused
                pool_member_addrs: vec![],   // unused
            },
            frontend: Frontend {
                name: name.to_string(),
                partition: config.bigip.partitions[0].clone(),
                balance: config.bigip.balance.clone(),
                mode: "http".to_string(),
                policies: None,
                profiles: None,
                virtual_address: Some(VirtualAddress {
                    bind_addr: config.bigip.external_addr.clone(),
                    port,
                }),
                ssl_profile,
            },
        },
    }
}
