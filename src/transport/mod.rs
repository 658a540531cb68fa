//! Outbound HTTP transport.
//!
//! # Data Flow
//! ```text
//! Proxy::forward
//!     → OutboundRequest {method, url, headers, body, verbose}
//!     → Transport::send (hyper_client.rs or reqwest_client.rs)
//!     → upstream response, returned as-is
//! ```
//!
//! # Design Decisions
//! - One call per request: no retries, no timeouts, no pooling policy
//! - Stale `content-length`/`transfer-encoding` are dropped and the length
//!   is recomputed from the final body, since a request hook may have
//!   replaced it
//! - `verbose` switches on debug-level logging of the exchange

pub mod hyper_client;
pub mod reqwest_client;

use axum::http::{header, HeaderMap, HeaderValue, Method};
use axum::response::Response;
use futures_util::future::BoxFuture;
use thiserror::Error;
use url::Url;

pub use self::hyper_client::HyperTransport;
pub use self::reqwest_client::ReqwestTransport;

/// Everything needed to issue the single upstream call.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: String,
    /// Ask the transport to trace the exchange.
    pub verbose: bool,
}

/// Errors raised while performing the upstream call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The outbound request could not be assembled.
    #[error("invalid outbound request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Hyper(#[from] hyper_util::client::legacy::Error),

    #[error("upstream request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Performs one outbound HTTP call.
pub trait Transport: Send + Sync {
    fn send(&self, request: OutboundRequest) -> BoxFuture<'static, Result<Response, TransportError>>;
}

/// Make body framing headers agree with `body`.
pub(crate) fn frame_body(headers: &mut HeaderMap, body: &str) {
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    if !body.is_empty() {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    }
}

fn log_outbound(method: &Method, url: &Url, headers: &HeaderMap) {
    tracing::debug!(
        method = %method,
        url = %url,
        headers = ?headers,
        "Sending upstream request"
    );
}

fn log_inbound(response: &Response) {
    tracing::debug!(
        status = %response.status(),
        version = ?response.version(),
        headers = ?response.headers(),
        "Upstream response received"
    );
}
