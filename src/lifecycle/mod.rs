//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Write initial document → Start worker
//!
//! Shutdown (shutdown.rs):
//!     SIGINT or trigger() → one-shot latch → broadcast
//!     → controller shuts its queue down → worker exits
//! ```
//!
//! # Design Decisions
//! - Shutdown fires at most once; repeat triggers are swallowed
//! - Shutdown is cooperative: queued work is discarded, nothing is flushed
//! - Configuration is re-derived from the event stream after restart, so
//!   there is no state to persist on the way out

pub mod shutdown;

pub use shutdown::ShutdownSignal;
