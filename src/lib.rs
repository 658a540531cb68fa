//! Programmable HTTP forwarding layer.
//!
//! Build a [`Proxy`] for one upstream target, optionally with hooks that
//! rewrite the outbound request or replace the upstream response, then
//! call [`Proxy::forward`] from your own server or serve it with
//! [`ProxyServer`].
//!
//! ```no_run
//! use axum::http::Method;
//! use hook_proxy::{HookOutput, ProxyOptions, RequestOverride};
//!
//! let proxy = ProxyOptions::new("http://localhost:9090")
//!     .request_hook(|_req, _body| {
//!         HookOutput::ready(RequestOverride::new().with_method(Method::DELETE))
//!     })
//!     .build()
//!     .expect("valid target");
//! # let _ = proxy;
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod transport;

pub use config::ProxyConfig;
pub use http::ProxyServer;
pub use lifecycle::Shutdown;
pub use proxy::{
    create_proxy, BoxError, ForwardError, HookOutput, HookResult, InvalidTarget, Proxy,
    ProxyOptions, RequestHead, RequestHook, RequestOverride, ResponseHook, Target,
};
pub use transport::{HyperTransport, OutboundRequest, ReqwestTransport, Transport, TransportError};
