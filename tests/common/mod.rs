//! Shared backends and helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header, Request},
    response::IntoResponse,
    routing::any,
    Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

use hook_proxy::{ProxyOptions, ProxyServer, Shutdown};

pub const JSON_BODY: &str = r#"{"test":"value"}"#;

/// Responds with a JSON description of the request it received:
/// `{method, url, body, headers}`.
pub async fn start_echo_backend() -> SocketAddr {
    let app = Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo));
    serve(app).await
}

/// Always responds `{"answer":42}`.
pub async fn start_answer_backend() -> SocketAddr {
    let app = Router::new().route(
        "/",
        any(|| async {
            (
                [(header::CONTENT_TYPE, "application/json")],
                json!({ "answer": 42 }).to_string(),
            )
        }),
    );
    serve(app).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn echo(request: Request<Body>) -> impl IntoResponse {
    let (parts, body) = request.into_parts();

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let path = parts
        .uri
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let headers: Map<String, Value> = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::String(value.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect();

    let description = json!({
        "method": parts.method.as_str(),
        "url": format!("http://{host}{path}"),
        "body": String::from_utf8_lossy(&body),
        "headers": headers,
    });

    (
        [(header::CONTENT_TYPE, "application/json")],
        description.to_string(),
    )
}

/// A running proxy server; stops when dropped.
pub struct ProxyHandle {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl ProxyHandle {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for ProxyHandle {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_proxy(options: ProxyOptions) -> ProxyHandle {
    let proxy = options.build().expect("valid target");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = ProxyServer::new(proxy);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    ProxyHandle { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// `PUT` the standard JSON body with the headers used across tests.
pub fn put_json(client: &reqwest::Client, url: &str) -> reqwest::RequestBuilder {
    client
        .put(url)
        .header("content-type", "application/json")
        .header("test-header", "test-value")
        .header("user-agent", "TestAgent/1.0.0")
        .body(JSON_BODY)
}

pub async fn json_of(response: reqwest::Response) -> Value {
    let text = response.text().await.unwrap();
    serde_json::from_str(&text).unwrap()
}
