use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, Identity};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- auth branch ---

#[tokio::test]
async fn whoami_without_authorization_is_untrusted() {
    let resp = app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let identity: Identity = body_json(resp).await;
    assert_eq!(identity.id, "untrusted");
}

#[tokio::test]
async fn whoami_with_trusted_token() {
    let req = Request::builder()
        .uri("/")
        .header(http::header::AUTHORIZATION, "Bearer trusted")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let identity: Identity = body_json(resp).await;
    assert_eq!(identity.id, "trusted");
}

#[tokio::test]
async fn whoami_with_other_token_is_untrusted() {
    let req = Request::builder()
        .uri("/")
        .header(http::header::AUTHORIZATION, "Bearer someone-else")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let identity: Identity = body_json(resp).await;
    assert_eq!(identity.id, "untrusted");
}

// --- users ---

#[tokio::test]
async fn get_user_one_is_ok_with_empty_body() {
    let resp = app().oneshot(get("/users/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_other_user_returns_structured_error() {
    let resp = app().oneshot(get("/users/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.error_code, "error42");
    assert_eq!(body.error_message, "borken request");
    assert_eq!(body.property, "mock");
}

#[tokio::test]
async fn delete_user_one_returns_204() {
    let req = Request::builder()
        .method("DELETE")
        .uri("/users/1")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// --- echo ---

#[tokio::test]
async fn echo_returns_post_body() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"id":"id"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], br#"{"id":"id"}"#);
}

#[tokio::test]
async fn echo_returns_put_body() {
    let resp = app()
        .oneshot(json_request("PUT", "/echo", r#"{"id":"other"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(&body_bytes(resp).await[..], br#"{"id":"other"}"#);
}

// --- non-schema failure ---

#[tokio::test]
async fn broken_returns_plain_text_503() {
    let resp = app().oneshot(get("/broken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(&body_bytes(resp).await[..], b"upstream unavailable");
}

// --- helpers for client edge cases ---

#[tokio::test]
async fn query_echoes_parameters() {
    let resp = app().oneshot(get("/query?offset=10&name=a%20b")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let params: serde_json::Value = body_json(resp).await;
    assert_eq!(params, serde_json::json!({"offset": "10", "name": "a b"}));
}

#[tokio::test]
async fn large_returns_json_string_of_requested_length() {
    let resp = app().oneshot(get("/large/5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: String = body_json(resp).await;
    assert_eq!(body, "aaaaa");
}
