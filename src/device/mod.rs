//! Device configuration document model.
//!
//! # Data Flow
//! ```text
//! worker indices (pools, rules, wildcard rules)
//!     → records.rs (services entries)
//!     → policy.rs (forwarding policy: sorted rules + ordinals)
//!     → document.rs (bigip + global + policies + services)
//!     → serde_json → ConfigWriter
//! ```
//!
//! # Design Decisions
//! - Wire structs only; no behavior beyond serialization
//! - camelCase names match the device schema
//! - Boolean match flags and absent optionals are omitted, not null
//! - Rule sort keys (`full_uri`) never reach the wire

pub mod document;
pub mod policy;
pub mod records;

pub use document::{ConfigDocument, GlobalSection};
pub use policy::{Action, Condition, Policy, Rule};
pub use records::{Backend, Frontend, NameRef, RouteConfig, RouteItem, SslProfile, VirtualAddress};
