//! Credential providers.
//!
//! # Design
//! A provider is anything that can produce a list of headers or fail. The
//! client calls it once per request, right before dispatch, so providers that
//! refresh tokens over the network can do so lazily. Plain closures implement
//! the trait, which covers most ad-hoc schemes without a new type.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CredentialError;
use crate::http::Headers;

/// Produces authentication headers for an outgoing request.
pub trait CredentialProvider: Send + Sync {
    fn headers(&self) -> Result<Headers, CredentialError>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Result<Headers, CredentialError> + Send + Sync,
{
    fn headers(&self) -> Result<Headers, CredentialError> {
        self()
    }
}

/// Adds `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerToken {
    token: Arc<str>,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl CredentialProvider for BearerToken {
    fn headers(&self) -> Result<Headers, CredentialError> {
        if self.token.is_empty() {
            return Err(CredentialError::msg("bearer token is empty"));
        }
        Ok(vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        )])
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// A fixed set of headers, e.g. an API key header.
#[derive(Clone, Default)]
pub struct StaticHeaders {
    headers: BTreeMap<String, String>,
}

impl StaticHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            headers: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl CredentialProvider for StaticHeaders {
    fn headers(&self) -> Result<Headers, CredentialError> {
        Ok(self
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }
}

impl fmt::Debug for StaticHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // names only
        f.debug_set().entries(self.headers.keys()).finish()
    }
}
