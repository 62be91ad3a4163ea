//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! controller. All types derive Serde traits; the `bigip` block is also
//! serialized verbatim into the emitted configuration document, so its
//! field names are the device wire names (camelCase).

use serde::{Deserialize, Serialize};

/// Root configuration for the route controller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Device configuration block, emitted as the `bigip` document section.
    pub bigip: DeviceConfig,

    /// Configuration writer settings.
    pub writer: WriterConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Device configuration.
///
/// Serialized into the output document unchanged, so the external driver
/// sees the same block the operator wrote.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Management endpoint of the device.
    pub url: String,

    /// Device username.
    pub user: String,

    /// Device password.
    pub pass: String,

    /// Partitions the controller may write to. Only the first is used.
    pub partitions: Vec<String>,

    /// Load-balancing algorithm applied to created pools.
    pub balance: String,

    /// Interval in seconds at which the driver re-verifies device state.
    pub verify_interval: u64,

    /// Bind address for the routing virtual servers.
    pub external_addr: String,

    /// SSL profile reference applied to the HTTPS virtual server.
    pub ssl_profile: String,

    /// Policies attached around the routing policy.
    pub policies: DevicePolicies,

    /// Profiles attached to the routing virtual servers (`/partition/name`).
    pub profiles: Vec<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            pass: String::new(),
            partitions: vec!["cf".to_string()],
            balance: "round-robin".to_string(),
            verify_interval: 30,
            external_addr: String::new(),
            ssl_profile: String::new(),
            policies: DevicePolicies::default(),
            profiles: Vec::new(),
        }
    }
}

/// Policies applied before and after the generated routing policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DevicePolicies {
    /// Policy references evaluated before routing (`/partition/name`).
    pub pre_routing: Vec<String>,

    /// Policy references evaluated after routing (`/partition/name`).
    pub post_routing: Vec<String>,
}

/// Configuration writer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Path the file sink renames completed documents onto.
    pub path: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            path: "routing-config.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
