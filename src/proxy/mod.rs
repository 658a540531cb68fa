//! Proxy construction and per-request forwarding.
//!
//! # Data Flow
//! ```text
//! ProxyOptions
//!     → target.rs (validate once, at construction)
//!     → Proxy (immutable, shared via Arc)
//!
//! Proxy::forward(request)
//!     → rewrite.rs (outbound URL, host/origin headers)
//!     → buffer body as text
//!     → request hook (optional, overrides replace computed values)
//!     → Transport::send (exactly once)
//!     → response hook (optional, replaces the response)
//! ```
//!
//! # Design Decisions
//! - No recovery: body, hook and transport failures surface unchanged
//! - No state shared between requests besides the read-only configuration

pub mod hooks;
pub mod rewrite;
pub mod target;

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use thiserror::Error;

use crate::transport::{HyperTransport, OutboundRequest, Transport, TransportError};

pub use hooks::{
    BoxError, HookOutput, HookResult, RequestHead, RequestHook, RequestOverride, ResponseHook,
};
pub use target::{InvalidTarget, Target};

/// Failures of a single forwarding pass.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The inbound URL could not be re-formed against the target.
    #[error("failed to form outbound url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    /// Raised inside a request or response hook.
    #[error("hook failed: {0}")]
    Hook(#[source] BoxError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Construction options for a [`Proxy`].
pub struct ProxyOptions {
    target: String,
    log: bool,
    update_origin: bool,
    verbose_transport: bool,
    request_hook: Option<RequestHook>,
    response_hook: Option<ResponseHook>,
    transport: Option<Arc<dyn Transport>>,
}

impl ProxyOptions {
    /// Options for `target` with logging off and origin rewriting on.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            log: false,
            update_origin: true,
            verbose_transport: false,
            request_hook: None,
            response_hook: None,
            transport: None,
        }
    }

    /// Emit an info event on construction and for every forwarded request.
    pub fn log(mut self, enabled: bool) -> Self {
        self.log = enabled;
        self
    }

    /// Rewrite an inbound `origin` header to the target origin (default on).
    pub fn update_origin(mut self, enabled: bool) -> Self {
        self.update_origin = enabled;
        self
    }

    /// Ask the transport to log each upstream exchange at debug level.
    pub fn verbose_transport(mut self, enabled: bool) -> Self {
        self.verbose_transport = enabled;
        self
    }

    /// Run `hook` before dispatch; the overrides it returns replace computed values.
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestHead, &str) -> HookOutput<RequestOverride> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    /// Run `hook` on the upstream response; its result is what the client gets.
    pub fn response_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Response) -> HookOutput<Response> + Send + Sync + 'static,
    {
        self.response_hook = Some(Arc::new(hook));
        self
    }

    /// Replace the default [`HyperTransport`].
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Validate the target and build the [`Proxy`].
    pub fn build(self) -> Result<Proxy, InvalidTarget> {
        Proxy::new(self)
    }
}

impl fmt::Debug for ProxyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyOptions")
            .field("target", &self.target)
            .field("log", &self.log)
            .field("update_origin", &self.update_origin)
            .field("verbose_transport", &self.verbose_transport)
            .field("request_hook", &self.request_hook.is_some())
            .field("response_hook", &self.response_hook.is_some())
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

struct ProxyInner {
    target: Target,
    log: bool,
    update_origin: bool,
    verbose_transport: bool,
    request_hook: Option<RequestHook>,
    response_hook: Option<ResponseHook>,
    transport: Arc<dyn Transport>,
}

/// Forwards requests to one validated target. Cheap to clone.
#[derive(Clone)]
pub struct Proxy {
    inner: Arc<ProxyInner>,
}

/// Validate `options` and build a [`Proxy`].
pub fn create_proxy(options: ProxyOptions) -> Result<Proxy, InvalidTarget> {
    Proxy::new(options)
}

impl Proxy {
    /// Validate the target; fails with [`InvalidTarget`] before any request is served.
    pub fn new(options: ProxyOptions) -> Result<Self, InvalidTarget> {
        let target = Target::parse(&options.target)?;

        if options.log {
            tracing::info!(upstream = %target, "Proxy for target {} created", options.target);
        }

        let transport = options
            .transport
            .unwrap_or_else(|| Arc::new(HyperTransport::new()));

        Ok(Self {
            inner: Arc::new(ProxyInner {
                target,
                log: options.log,
                update_origin: options.update_origin,
                verbose_transport: options.verbose_transport,
                request_hook: options.request_hook,
                response_hook: options.response_hook,
                transport,
            }),
        })
    }

    pub fn target(&self) -> &Target {
        &self.inner.target
    }

    /// Forward one inbound request to the target.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ForwardError> {
        let inner = &*self.inner;
        let (mut parts, body) = request.into_parts();

        let inbound_url = rewrite::inbound_url(&parts)?;
        let url = rewrite::rewrite_url(&inbound_url, &inner.target)?;
        if inner.log {
            tracing::info!(url = %url, "Proxying to {}", url);
        }

        rewrite::normalize_headers(&mut parts.headers, &inner.target, inner.update_origin);

        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(ForwardError::Body)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        let outbound = match &inner.request_hook {
            None => OutboundRequest {
                method: parts.method,
                url,
                headers: parts.headers,
                body,
                verbose: inner.verbose_transport,
            },
            Some(hook) => {
                let head = RequestHead {
                    method: parts.method,
                    url: inbound_url,
                    version: parts.version,
                    headers: parts.headers,
                };
                let mut outbound = OutboundRequest {
                    method: head.method.clone(),
                    url,
                    headers: head.headers.clone(),
                    body,
                    verbose: inner.verbose_transport,
                };
                let overrides = hook(&head, &outbound.body)
                    .resolve()
                    .await
                    .map_err(ForwardError::Hook)?;
                overrides.apply(&mut outbound);
                outbound
            }
        };

        let response = inner.transport.send(outbound).await?;

        match &inner.response_hook {
            Some(hook) => hook(response).resolve().await.map_err(ForwardError::Hook),
            None => Ok(response),
        }
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", &self.inner.target)
            .field("update_origin", &self.inner.update_origin)
            .finish_non_exhaustive()
    }
}
