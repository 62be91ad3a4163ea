//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → shared via Arc to controller and observability
//!
//! The bigip block is additionally serialized verbatim into every emitted
//! configuration document (the `bigip` section).
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the controller holds it by reference
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Malformed `/partition/name` references are not validation errors; they
//!   are skipped with a warning when policy/profile lists are assembled

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::DeviceConfig;
pub use schema::DevicePolicies;
pub use schema::LoggingConfig;
pub use schema::RouterConfig;
