use std::{collections::BTreeMap, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const TRUSTED_AUTHORIZATION: &str = "Bearer trusted";

/// How long `/slow` stalls before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
}

/// Structured error body sent with every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error_code: String,
    pub error_message: String,
    pub property: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(whoami))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/echo", post(echo).put(echo))
        .route("/broken", get(broken))
        .route("/query", get(query))
        .route("/large/{len}", get(large))
        .route("/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reports whether the caller presented the trusted bearer token.
async fn whoami(headers: HeaderMap) -> Json<Identity> {
    let trusted = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(TRUSTED_AUTHORIZATION);
    let id = if trusted { "trusted" } else { "untrusted" };
    Json(Identity { id: id.to_string() })
}

/// Only user 1 exists; every other id is a bad request.
async fn get_user(Path(id): Path<String>) -> Response {
    if id == "1" {
        return StatusCode::OK.into_response();
    }
    bad_request().into_response()
}

async fn delete_user(Path(id): Path<String>) -> Response {
    if id == "1" {
        return StatusCode::NO_CONTENT.into_response();
    }
    bad_request().into_response()
}

/// Returns the request body unchanged.
async fn echo(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Failure status with a body outside the error schema.
async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable")
}

/// Returns the query parameters as a JSON object.
async fn query(
    Query(params): Query<BTreeMap<String, String>>,
) -> Json<BTreeMap<String, String>> {
    Json(params)
}

/// A JSON string of `len` characters.
async fn large(Path(len): Path<usize>) -> Json<String> {
    Json("a".repeat(len))
}

async fn slow() -> Json<Identity> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(Identity {
        id: "slow".to_string(),
    })
}

fn bad_request() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error_code: "error42".to_string(),
            error_message: "borken request".to_string(),
            property: "mock".to_string(),
        }),
    )
}
