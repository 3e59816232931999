//! Response classification.
//!
//! A response is a success when its status is in 200..=299. Anything else is
//! an error: the structured `ApiError` when the body matches that schema,
//! `Error::UnexpectedStatus` otherwise. The success path never inspects the
//! body unless the caller asks for a decoded value.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{Error, Result};
use crate::http::HttpResponse;
use crate::types::ApiError;

/// Characters of a non-schema error body kept in `Error::UnexpectedStatus`.
pub const BODY_EXCERPT_CHARS: usize = 256;

/// Map a non-success status to the matching error.
pub fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    match serde_json::from_slice::<ApiError>(&response.body) {
        Ok(err) => Err(Error::Api(err)),
        Err(parse) => {
            warn!(
                status = response.status,
                error = %parse,
                "error response does not match the structured error schema"
            );
            Err(Error::UnexpectedStatus {
                status: response.status,
                body: excerpt(&response.body),
            })
        }
    }
}

/// Check the status, then decode the body as JSON into `T`.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    check_status(response)?;
    serde_json::from_slice(&response.body).map_err(Error::Decode)
}

/// Check the status, then hand back the raw body.
pub fn into_body(response: HttpResponse) -> Result<Vec<u8>> {
    check_status(&response)?;
    Ok(response.body)
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_EXCERPT_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn success_with_empty_body() {
        assert!(check_status(&response(200, "")).is_ok());
        assert!(check_status(&response(204, "")).is_ok());
    }

    #[test]
    fn structured_error_body() {
        let err = check_status(&response(
            400,
            r#"{"error_code":"error42","error_message":"borken request","property":"mock"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        assert_eq!(
            err.to_string(),
            "error: error42, message: borken request, property: mock"
        );
    }

    #[test]
    fn redirect_status_is_not_success() {
        let err = check_status(&response(302, "")).unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus { status: 302, .. }));
    }

    #[test]
    fn non_schema_error_body_falls_back() {
        let err = check_status(&response(500, "internal error")).unwrap_err();
        match err {
            Error::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fallback_body_is_truncated() {
        let long = "x".repeat(BODY_EXCERPT_CHARS * 2);
        let err = check_status(&response(502, &long)).unwrap_err();
        let Error::UnexpectedStatus { body, .. } = err else {
            panic!("expected UnexpectedStatus");
        };
        assert_eq!(body.chars().count(), BODY_EXCERPT_CHARS);
    }

    #[test]
    fn decode_success() {
        let item: Item = decode(&response(200, r#"{"id":"trusted"}"#)).unwrap();
        assert_eq!(item, Item { id: "trusted".to_string() });
    }

    #[test]
    fn decode_bad_json() {
        let err = decode::<Item>(&response(200, "not json")).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn decode_skips_body_on_failure_status() {
        // The body happens to fit `Item`; it must still be reported as an error.
        let err = decode::<Item>(&response(404, r#"{"id":"x"}"#)).unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
    }

    #[test]
    fn into_body_returns_raw_bytes() {
        let body = into_body(response(201, "raw")).unwrap();
        assert_eq!(body, b"raw");
    }
}
