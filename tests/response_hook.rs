//! Response hook replacement, end to end.

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use hook_proxy::{BoxError, HookOutput, ProxyOptions};
use serde_json::{json, Value};

mod common;

use common::{client, json_of, start_answer_backend, start_proxy};

#[tokio::test]
async fn test_hook_adds_response_header() {
    let backend = start_answer_backend().await;
    let proxy = start_proxy(ProxyOptions::new(format!("http://{backend}")).response_hook(
        |mut response| {
            response
                .headers_mut()
                .insert("x-test-header", HeaderValue::from_static("test-value"));
            HookOutput::ready(response)
        },
    ))
    .await;

    let response = client().get(proxy.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-test-header"], "test-value");
    assert_eq!(json_of(response).await, json!({ "answer": 42 }));
}

#[tokio::test]
async fn test_hook_rewrites_body() {
    let backend = start_answer_backend().await;
    let proxy = start_proxy(ProxyOptions::new(format!("http://{backend}")).response_hook(
        |response| {
            HookOutput::deferred(async move {
                let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
                let value: Value = serde_json::from_slice(&bytes)?;
                let doubled = value["answer"].as_i64().unwrap_or_default() * 2;
                Ok::<_, BoxError>(Response::new(Body::from(
                    json!({ "answer": doubled }).to_string(),
                )))
            })
        },
    ))
    .await;

    let response = client().get(proxy.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_of(response).await, json!({ "answer": 84 }));
}

#[tokio::test]
async fn test_hook_replaces_status() {
    let backend = start_answer_backend().await;
    let proxy = start_proxy(ProxyOptions::new(format!("http://{backend}")).response_hook(
        |response| {
            let (mut parts, body) = response.into_parts();
            parts.status = StatusCode::NOT_FOUND;
            HookOutput::ready(Response::from_parts(parts, body))
        },
    ))
    .await;

    let response = client().get(proxy.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_of(response).await, json!({ "answer": 42 }));
}

#[tokio::test]
async fn test_failing_hook_is_bad_gateway() {
    let backend = start_answer_backend().await;
    let proxy = start_proxy(
        ProxyOptions::new(format!("http://{backend}"))
            .response_hook(|_| HookOutput::fail("response rejected")),
    )
    .await;

    let response = client().get(proxy.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
