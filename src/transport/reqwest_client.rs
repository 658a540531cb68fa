//! Transport over a `reqwest` client.
//!
//! Supports `https://` upstreams. The response body is streamed back
//! rather than buffered.

use axum::body::Body;
use axum::http::response::Builder;
use axum::response::Response;
use futures_util::future::BoxFuture;

use super::{frame_body, log_inbound, log_outbound, OutboundRequest, Transport, TransportError};

/// Transport over a [`reqwest::Client`]; reaches `https` targets.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: OutboundRequest) -> BoxFuture<'static, Result<Response, TransportError>> {
        let client = self.client.clone();

        Box::pin(async move {
            let OutboundRequest {
                method,
                url,
                mut headers,
                body,
                verbose,
            } = request;

            frame_body(&mut headers, &body);
            if verbose {
                log_outbound(&method, &url, &headers);
            }

            let mut outbound = client.request(method, url).headers(headers);
            if !body.is_empty() {
                outbound = outbound.body(body);
            }
            let upstream = outbound.send().await?;

            let mut builder = Builder::new()
                .status(upstream.status())
                .version(upstream.version());
            if let Some(h) = builder.headers_mut() {
                *h = upstream.headers().clone();
            }
            let response = builder.body(Body::from_stream(upstream.bytes_stream()))?;

            if verbose {
                log_inbound(&response);
            }
            Ok(response)
        })
    }
}
