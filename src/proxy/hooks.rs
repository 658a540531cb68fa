//! Request and response modification hooks.
//!
//! Hooks are plain closures stored in the proxy configuration. Both kinds
//! return a [`HookOutput`], which is either an immediate result or a boxed
//! future, so synchronous and asynchronous hooks look the same to the
//! forwarding pipeline.

use std::future::Future;
use std::sync::Arc;

use axum::http::{HeaderMap, Method, Version};
use axum::response::Response;
use futures_util::future::BoxFuture;
use url::Url;

use crate::transport::OutboundRequest;

/// Error type hooks fail with. Propagated to the caller unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type HookResult<T> = Result<T, BoxError>;

/// Called with the inbound request head and the buffered body text.
pub type RequestHook =
    Arc<dyn Fn(&RequestHead, &str) -> HookOutput<RequestOverride> + Send + Sync>;

/// Called with the upstream response; whatever it returns is sent back.
pub type ResponseHook = Arc<dyn Fn(Response) -> HookOutput<Response> + Send + Sync>;

/// Result of a hook, available now or after awaiting.
pub enum HookOutput<T> {
    Ready(HookResult<T>),
    Deferred(BoxFuture<'static, HookResult<T>>),
}

impl<T> HookOutput<T> {
    pub fn ready(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    pub fn fail(error: impl Into<BoxError>) -> Self {
        Self::Ready(Err(error.into()))
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = HookResult<T>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    pub async fn resolve(self) -> HookResult<T> {
        match self {
            Self::Ready(result) => result,
            Self::Deferred(future) => future.await,
        }
    }
}

impl<T> From<HookResult<T>> for HookOutput<T> {
    fn from(result: HookResult<T>) -> Self {
        Self::Ready(result)
    }
}

impl From<RequestOverride> for HookOutput<RequestOverride> {
    fn from(value: RequestOverride) -> Self {
        Self::ready(value)
    }
}

impl From<Response> for HookOutput<Response> {
    fn from(value: Response) -> Self {
        Self::ready(value)
    }
}

/// The inbound request as a request hook sees it.
///
/// `url` is the URL the client addressed; `headers` already carry the
/// rewritten `host` (and `origin`, when enabled).
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub url: Url,
    pub version: Version,
    pub headers: HeaderMap,
}

/// Fields a request hook wants to replace. `None` keeps the value the
/// proxy computed.
#[derive(Debug, Clone, Default)]
pub struct RequestOverride {
    pub url: Option<Url>,
    /// Replaces the whole header set; nothing is merged.
    pub headers: Option<HeaderMap>,
    pub body: Option<String>,
    pub method: Option<Method>,
}

impl RequestOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub(crate) fn apply(self, request: &mut OutboundRequest) {
        if let Some(url) = self.url {
            request.url = url;
        }
        if let Some(headers) = self.headers {
            request.headers = headers;
        }
        if let Some(body) = self.body {
            request.body = body;
        }
        if let Some(method) = self.method {
            request.method = method;
        }
    }
}
