//! End-to-end gateway tests over a real HTTP transport.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use spa_shell::document::{Document, SharedDocument};
use spa_shell::gateway::{DocumentToken, OutgoingRequest, RequestGateway, ReqwestTransport};

mod common;

fn transport(addr: std::net::SocketAddr) -> ReqwestTransport {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    ReqwestTransport::new(client).with_base_url(Url::parse(&format!("http://{addr}/")).unwrap())
}

fn gateway(
    addr: std::net::SocketAddr,
    document: &SharedDocument,
) -> RequestGateway<ReqwestTransport, DocumentToken> {
    RequestGateway::new(
        transport(addr),
        DocumentToken::new(document.clone(), "csrfmiddlewaretoken"),
    )
}

async fn echoed(res: reqwest::Response) -> Value {
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_token_injected_from_document() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::new(Document::from_html(
        r#"<input type="hidden" name="csrfmiddlewaretoken" value="abc123">"#,
    ));
    let gateway = gateway(addr, &document);

    let body = echoed(gateway.post("/datasets/create/", "name=qa").await.unwrap()).await;
    assert_eq!(body["headers"]["x-csrftoken"], "abc123");
    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/datasets/create/");
    assert_eq!(body["body"], "name=qa");
}

#[tokio::test]
async fn test_explicit_token_header_preserved() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::new(Document::new().with_field("csrfmiddlewaretoken", "abc123"));
    let gateway = gateway(addr, &document);

    let mut headers = HeaderMap::new();
    headers.insert("X-CSRFToken", HeaderValue::from_static("explicit"));
    let res = gateway
        .request(Method::POST, "/datasets/delete/3/", Some(headers), None)
        .await
        .unwrap();

    let body = echoed(res).await;
    assert_eq!(body["headers"]["x-csrftoken"], "explicit");
}

#[tokio::test]
async fn test_no_token_field_sends_caller_headers_only() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::new(Document::from_html("<html><body>no form</body></html>"));
    let gateway = gateway(addr, &document);

    let mut headers = HeaderMap::new();
    headers.insert("x-custom", HeaderValue::from_static("kept"));
    let res = gateway
        .request(Method::GET, "/evaluation/status/", Some(headers), None)
        .await
        .unwrap();

    let body = echoed(res).await;
    assert_eq!(body["headers"]["x-custom"], "kept");
    assert!(body["headers"].get("x-csrftoken").is_none());
}

#[tokio::test]
async fn test_token_rotation_between_requests() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::empty();
    let gateway = gateway(addr, &document);

    let first = echoed(gateway.get("/").await.unwrap()).await;
    assert!(first["headers"].get("x-csrftoken").is_none());

    document.load_html(r#"<input name="csrfmiddlewaretoken" value="v1">"#);
    let second = echoed(gateway.get("/").await.unwrap()).await;
    assert_eq!(second["headers"]["x-csrftoken"], "v1");

    document.load_html(r#"<input name="csrfmiddlewaretoken" value="v2">"#);
    let third = echoed(gateway.get("/").await.unwrap()).await;
    assert_eq!(third["headers"]["x-csrftoken"], "v2");
}

#[tokio::test]
async fn test_error_status_surfaces_transport_error() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::new(Document::new().with_field("csrfmiddlewaretoken", "abc123"));
    let gateway = gateway(addr, &document);

    let err = gateway.get("/status/404").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let err = gateway.delete("/status/503").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_connection_failure_surfaces_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = gateway(addr, &SharedDocument::empty());
    let err = gateway.get("/").await.unwrap_err();
    assert!(err.is_connect() || err.is_request());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_json_descriptor_round_trip() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::new(Document::new().with_field("csrfmiddlewaretoken", "abc123"));
    let gateway = gateway(addr, &document);

    let request = OutgoingRequest::post("/run_evaluation/")
        .json(&serde_json::json!({ "dataset_id": 7 }))
        .unwrap();
    let body = echoed(gateway.send(request).await.unwrap()).await;

    assert_eq!(body["headers"]["content-type"], "application/json");
    assert_eq!(body["headers"]["x-csrftoken"], "abc123");
    assert_eq!(body["body"], r#"{"dataset_id":7}"#);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let addr = common::start_echo_backend().await;
    let document = SharedDocument::new(Document::new().with_field("csrfmiddlewaretoken", "shared"));
    let gateway = Arc::new(gateway(addr, &document));

    let calls = (0..8).map(|i| {
        let gateway = gateway.clone();
        async move {
            let mut headers = HeaderMap::new();
            if i % 2 == 0 {
                headers.insert("x-csrftoken", HeaderValue::from_static("mine"));
            }
            let res = gateway
                .request(Method::GET, &format!("/item/{i}"), Some(headers), None)
                .await
                .unwrap();
            (i, echoed(res).await)
        }
    });

    for (i, body) in futures_util::future::join_all(calls).await {
        let expected = if i % 2 == 0 { "mine" } else { "shared" };
        assert_eq!(body["headers"]["x-csrftoken"], expected);
        assert_eq!(body["path"], format!("/item/{i}"));
    }
}
