//! Transport over the hyper-util legacy client.
//!
//! Plain `http://` upstreams only: the connector is an [`HttpConnector`],
//! so an `https://` URL fails with a transport error.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use super::{frame_body, log_inbound, log_outbound, OutboundRequest, Transport, TransportError};

/// Default transport.
#[derive(Debug, Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
}

impl HyperTransport {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Use a preconfigured client (e.g. with custom connector settings).
    pub fn with_client(client: Client<HttpConnector, Body>) -> Self {
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
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

            let mut builder = Request::builder().method(method).uri(url.as_str());
            if let Some(h) = builder.headers_mut() {
                *h = headers;
            }
            let req = builder.body(Body::from(body))?;

            let response: hyper::Response<Incoming> = client.request(req).await?;
            let (parts, body) = response.into_parts();
            let response = Response::from_parts(parts, Body::new(body));

            if verbose {
                log_inbound(&response);
            }
            Ok(response)
        })
    }
}
