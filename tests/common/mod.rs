//! Shared utilities for integration testing.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start a backend that echoes method, path, headers and body as JSON.
///
/// `/status/{code}` answers with that status instead.
pub async fn start_echo_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route("/status/{code}", any(status))
        .fallback(echo);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn echo(method: Method, uri: axum::http::Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "headers": headers,
        "body": body,
    }))
}

async fn status(Path(code): Path<u16>) -> (StatusCode, &'static str) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, "status")
}
