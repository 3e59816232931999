//! Wire DTOs shared with the server.
//!
//! # Design
//! Only the structured error body is fixed by the API; success payloads are
//! whatever the caller decodes into. The mock-server crate defines the same
//! schema independently, and the integration tests catch drift between them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error returned by the server with a non-2xx status.
///
/// `property` names the offending field and is empty when the server omits
/// it. The `Display` form is the canonical rendering callers match on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("error: {error_code}, message: {error_message}, property: {property}")]
pub struct ApiError {
    pub error_code: String,
    pub error_message: String,
    #[serde(default)]
    pub property: String,
}
