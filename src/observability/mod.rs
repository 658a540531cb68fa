//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; the proxy's `log` flag gates
//!   its own info events rather than writing to stdout
//! - Pretty format for development, JSON for machine parsing

pub mod logging;

pub use logging::init_logging;
