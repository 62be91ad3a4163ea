//! Service records for the emitted configuration document.
//!
//! Every entry in the document's `services` list is a `RouteConfig`: a
//! frontend (the device-side object) paired with a backend (the service it
//! forwards to). Pool-only records carry endpoint addresses and no virtual
//! address; virtual-server records carry a virtual address and an empty
//! endpoint list.

use serde::Serialize;

/// One entry of the `services` document section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteConfig {
    #[serde(rename = "virtualServer")]
    pub item: RouteItem,
}

/// Frontend/backend pair describing one device object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteItem {
    pub backend: Backend,
    pub frontend: Frontend,
}

/// Backend half: the service and its endpoint addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backend {
    /// Original route URI for pools, virtual-server name otherwise.
    pub service_name: String,

    /// Unused sentinel; the device resolves endpoints from `poolMemberAddrs`.
    pub service_port: i32,

    /// Unique `host:port` addresses, in arrival order.
    pub pool_member_addrs: Vec<String>,
}

/// Frontend half: the device-side object definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontend {
    #[serde(rename = "virtualServerName")]
    pub name: String,

    pub partition: String,

    pub balance: String,

    /// Protocol mode, always `http`.
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<NameRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<NameRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_address: Option<VirtualAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_profile: Option<SslProfile>,
}

/// Listener address of a virtual server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualAddress {
    pub bind_addr: String,
    pub port: i32,
}

/// SSL profile reference for HTTPS termination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SslProfile {
    #[serde(rename = "f5ProfileName")]
    pub profile_name: String,
}

/// A partition-qualified object reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
    pub name: String,
    pub partition: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_record_serialization() {
        let record = RouteConfig {
            item: RouteItem {
                backend: Backend {
                    service_name: "foo.example.com/api".into(),
                    service_port: -1,
                    pool_member_addrs: vec!["10.0.0.1:8080".into()],
                },
                frontend: Frontend {
                    name: "foo-abc".into(),
                    partition: "cf".into(),
                    balance: "round-robin".into(),
                    mode: "http".into(),
                    policies: None,
                    profiles: None,
                    virtual_address: None,
                    ssl_profile: None,
                },
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        let vs = &value["virtualServer"];
        assert_eq!(vs["backend"]["serviceName"], "foo.example.com/api");
        assert_eq!(vs["backend"]["servicePort"], -1);
        assert_eq!(vs["backend"]["poolMemberAddrs"][0], "10.0.0.1:8080");
        assert_eq!(vs["frontend"]["virtualServerName"], "foo-abc");
        // optionals are omitted entirely, not emitted as null
        assert!(vs["frontend"].get("virtualAddress").is_none());
        assert!(vs["frontend"].get("sslProfile").is_none());
        assert!(vs["frontend"].get("policies").is_none());
    }

    #[test]
    fn test_virtual_server_serialization() {
        let record = RouteConfig {
            item: RouteItem {
                backend: Backend {
                    service_name: "routing-vip-https".into(),
                    service_port: -1,
                    pool_member_addrs: vec![],
                },
                frontend: Frontend {
                    name: "routing-vip-https".into(),
                    partition: "cf".into(),
                    balance: "round-robin".into(),
                    mode: "http".into(),
                    policies: None,
                    profiles: None,
                    virtual_address: Some(VirtualAddress {
                        bind_addr: "192.168.1.1".into(),
                        port: 443,
                    }),
                    ssl_profile: Some(SslProfile {
                        profile_name: "Common/clientssl".into(),
                    }),
                },
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        let frontend = &value["virtualServer"]["frontend"];
        assert_eq!(frontend["virtualAddress"]["bindAddr"], "192.168.1.1");
        assert_eq!(frontend["virtualAddress"]["port"], 443);
        assert_eq!(frontend["sslProfile"]["f5ProfileName"], "Common/clientssl");
    }
}
