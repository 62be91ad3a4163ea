//! Top-level configuration document.

use serde::Serialize;

use crate::config::DeviceConfig;
use crate::device::policy::Policy;
use crate::device::records::RouteConfig;

/// The complete document handed to the configuration writer.
///
/// Field order is fixed so equal states serialize to equal bytes; the
/// external writer relies on that to deduplicate across runs. The initial
/// startup document carries only `bigip` and `global`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDocument {
    pub bigip: DeviceConfig,
    pub global: GlobalSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<Policy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<RouteConfig>>,
}

/// Controller-wide settings mirrored to the driver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSection {
    pub log_level: String,
    pub verify_interval: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;

    #[test]
    fn test_initial_document_shape() {
        let config = RouterConfig::default();
        let document = ConfigDocument {
            bigip: config.bigip.clone(),
            global: GlobalSection {
                log_level: config.logging.level.clone(),
                verify_interval: config.bigip.verify_interval,
            },
            policies: None,
            services: None,
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["global"]["logLevel"], "info");
        assert_eq!(value["global"]["verifyInterval"], 30);
        assert_eq!(value["bigip"]["partitions"][0], "cf");
        assert!(value.get("policies").is_none());
        assert!(value.get("services").is_none());
    }

    #[test]
    fn test_document_bytes_are_stable() {
        let config = RouterConfig::default();
        let make = || ConfigDocument {
            bigip: config.bigip.clone(),
            global: GlobalSection {
                log_level: config.logging.level.clone(),
                verify_interval: config.bigip.verify_interval,
            },
            policies: None,
            services: Some(vec![]),
        };

        let a = serde_json::to_vec(&make()).unwrap();
        let b = serde_json::to_vec(&make()).unwrap();
        assert_eq!(a, b);
    }
}
