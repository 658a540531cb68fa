//! HTTP front end for embedding a proxy.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router, catch-all route)
//!     → Proxy::forward
//!     → upstream response, or 502 on forwarding failure
//! ```

pub mod server;

pub use server::ProxyServer;
