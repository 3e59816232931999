//! Blocking transport seam.
//!
//! # Design
//! The client never talks to the network directly. It hands a fully built
//! `HttpRequest` to a `Transport` and gets an `HttpResponse` back, so the
//! request-building and classification logic stays deterministic and can be
//! unit-tested with an in-memory transport. `UreqTransport` is the default.
//!
//! Non-2xx statuses are data here, not errors: the agent is configured with
//! `http_status_as_error(false)` and the classifier decides what they mean.

use std::time::Duration;

use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP exchange.
///
/// Implementations must return every status code as an `HttpResponse` and
/// reserve `Err` for failures where no complete response was received.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// `timeout` bounds the whole exchange; `None` leaves it to ureq.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wraps a preconfigured agent. It must not treat statuses as errors,
    /// otherwise 4xx/5xx responses surface as transport failures.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let result = match (request.method, body) {
            (HttpMethod::Get, None) => prepare(self.agent.get(url), request).call(),
            (HttpMethod::Get, Some(body)) => prepare(self.agent.get(url), request)
                .force_send_body()
                .send(body),
            (HttpMethod::Delete, None) => prepare(self.agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(body)) => prepare(self.agent.delete(url), request)
                .force_send_body()
                .send(body),
            (HttpMethod::Post, Some(body)) => prepare(self.agent.post(url), request).send(body),
            (HttpMethod::Post, None) => prepare(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => prepare(self.agent.put(url), request).send(body),
            (HttpMethod::Put, None) => prepare(self.agent.put(url), request).send_empty(),
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Read the full body; ureq otherwise stops at 10 MiB.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(TransportError::new)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn prepare<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.query {
        builder = builder.query(name, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
