//! Work item model for the controller queue.
//!
//! Everything the intake operations hand to the worker travels as a
//! `WorkItem`: an operation code plus a closed, tagged payload. All types
//! derive `Eq + Hash` so the queue can collapse equal pending items.

use std::fmt;
use std::fmt::Write as _;

use sha2::{Digest, Sha256};

/// A backend instance registered for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The `host:port` form used everywhere in pool member lists.
    pub fn canonical_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Kind of routing virtual server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualServerType {
    /// Plain listener on port 80.
    Http,
    /// TLS-terminating listener on port 443.
    Https,
}

impl fmt::Display for VirtualServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VirtualServerType::Http => write!(f, "HTTP"),
            VirtualServerType::Https => write!(f, "HTTPS"),
        }
    }
}

/// Operation code of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Remove,
}

/// Pool mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolData {
    /// Derived pool name (hash-suffixed, or the stripped URI for wildcards).
    pub name: String,
    /// Effective match URI; wildcards are stored without the `*.` prefix.
    pub uri: String,
    /// Canonical `host:port` endpoint address.
    pub endpoint: String,
    pub wildcard: bool,
}

impl PoolData {
    /// Build the payload for a route URI.
    ///
    /// Both the add and remove paths go through here so they agree on the
    /// stripped wildcard URI and the derived pool name.
    pub fn for_uri(uri: &str, endpoint: &Endpoint) -> Self {
        if let Some(stripped) = uri.strip_prefix("*.") {
            Self {
                name: stripped.to_string(),
                uri: stripped.to_string(),
                endpoint: endpoint.canonical_addr(),
                wildcard: true,
            }
        } else {
            Self {
                name: make_pool_name(uri),
                uri: uri.to_string(),
                endpoint: endpoint.canonical_addr(),
                wildcard: false,
            }
        }
    }
}

/// Virtual-server mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualData {
    pub name: String,
    pub kind: VirtualServerType,
}

/// The two payload variants the worker dispatches on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkPayload {
    Pool(PoolData),
    Virtual(VirtualData),
}

/// One unit of work: operation plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub op: Op,
    pub payload: WorkPayload,
}

/// Derive the pool name for a non-wildcard URI.
///
/// `<first label>-<hex of first 8 bytes of SHA-256(uri)>`; the hash suffix
/// keeps names unique across URIs sharing a first label while staying within
/// device name-length limits.
pub fn make_pool_name(uri: &str) -> String {
    let digest = Sha256::digest(uri.as_bytes());
    let label = uri
        .split(|c| c == '.' || c == '/')
        .next()
        .unwrap_or_default();

    let mut name = String::with_capacity(label.len() + 17);
    name.push_str(label);
    name.push('-');
    for byte in &digest[..8] {
        let _ = write!(name, "{byte:02x}");
    }
    name
}
