//! HTTP server that exposes a [`Proxy`] on a listener.
//!
//! # Responsibilities
//! - Route every path and method to the proxy
//! - Translate forwarding failures into `502 Bad Gateway`
//! - Serve until the shutdown signal fires
//!
//! Applications that already run an axum server can mount
//! [`ProxyServer::router`] instead of calling [`ProxyServer::run`].

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::proxy::Proxy;

/// HTTP front end for a single proxy.
pub struct ProxyServer {
    router: Router,
}

impl ProxyServer {
    pub fn new(proxy: Proxy) -> Self {
        Self {
            router: Self::build_router(proxy),
        }
    }

    fn build_router(proxy: Proxy) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(proxy)
            .layer(TraceLayer::new_for_http())
    }

    /// The catch-all router, for mounting into an existing application.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn proxy_handler(State(proxy): State<Proxy>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match proxy.forward(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(method = %method, path = %path, error = %e, "Forwarding failed");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
