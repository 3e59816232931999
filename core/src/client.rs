//! REST client, request builder and dispatcher.
//!
//! # Design
//! `RestClient` holds only the endpoint, an optional credential provider and
//! a transport, all immutable and shared through `Arc`, so one client can be
//! cloned or shared across threads. Each verb method returns a
//! `RequestBuilder` that accumulates path, headers, query and body without
//! doing any work. The terminal `recv*` methods consume the builder, which
//! makes a handle single-use: build, dispatch, classify.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::auth::CredentialProvider;
use crate::classify;
use crate::error::{Error, Result};
use crate::http::{set_header, Headers, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Blocking client bound to one endpoint.
#[derive(Clone)]
pub struct RestClient {
    endpoint: Arc<str>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    /// Client without credentials using the default `ureq` transport.
    pub fn new(endpoint: &str) -> Self {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: &str) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    /// Base URL exactly as given.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Start a GET request. `path` is appended to the endpoint, so
    /// positional arguments go through `format_args!` or `format!`:
    /// `client.get(format_args!("/users/{}", id))`.
    pub fn get(&self, path: impl fmt::Display) -> RequestBuilder<'_> {
        self.request(HttpMethod::Get, path)
    }

    pub fn put(&self, path: impl fmt::Display) -> RequestBuilder<'_> {
        self.request(HttpMethod::Put, path)
    }

    pub fn post(&self, path: impl fmt::Display) -> RequestBuilder<'_> {
        self.request(HttpMethod::Post, path)
    }

    pub fn delete(&self, path: impl fmt::Display) -> RequestBuilder<'_> {
        self.request(HttpMethod::Delete, path)
    }

    pub fn request(&self, method: HttpMethod, path: impl fmt::Display) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method,
            url: join_url(&self.endpoint, &path.to_string()),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attach credentials and execute `request` exactly once.
    ///
    /// Provider headers replace user headers of the same name. When the
    /// provider fails nothing is sent.
    pub fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        if let Some(credentials) = &self.credentials {
            for (name, value) in credentials.headers()? {
                set_header(&mut request.headers, &name, &value);
            }
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.execute(&request)?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            body_len = response.body.len(),
            "received response"
        );
        Ok(response)
    }
}

/// `endpoint + path`, dropping the endpoint's trailing slashes only when
/// `path` supplies its own.
fn join_url(endpoint: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{path}", endpoint.trim_end_matches('/'))
    } else {
        format!("{endpoint}{path}")
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

/// Configures a [`RestClient`].
pub struct ClientBuilder {
    endpoint: String,
    credentials: Option<Arc<dyn CredentialProvider>>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            credentials: None,
            timeout: None,
            transport: None,
        }
    }

    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    /// Global timeout for the default transport. Ignored when a custom
    /// transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> RestClient {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqTransport::with_timeout(self.timeout)),
        };
        RestClient {
            endpoint: Arc::from(self.endpoint),
            credentials: self.credentials,
            transport,
        }
    }
}

/// One pending request. Nothing is sent until a `recv*` method is called.
#[must_use = "a request does nothing until one of the recv methods is called"]
pub struct RequestBuilder<'a> {
    client: &'a RestClient,
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    headers: Headers,
    body: Option<std::result::Result<Vec<u8>, serde_json::Error>>,
}

impl RequestBuilder<'_> {
    /// Serialize `payload` as the JSON body. A later call replaces it.
    pub fn send<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        let body = serde_json::to_vec(payload);
        if body.is_ok() {
            set_header(&mut self.headers, "Content-Type", "application/json");
        }
        self.body = Some(body);
        self
    }

    /// Set a request header. Credential headers win over it on dispatch.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// The request descriptor, without credential headers.
    pub fn build(self) -> Result<HttpRequest> {
        let body = self.body.transpose().map_err(Error::Serialize)?;
        Ok(HttpRequest {
            method: self.method,
            url: self.url,
            query: self.query,
            headers: self.headers,
            body,
        })
    }

    /// Succeed on any 2xx status, ignoring the body.
    pub fn recv_status(self) -> Result<()> {
        let response = self.dispatch()?;
        classify::check_status(&response)
    }

    /// Decode a 2xx JSON body into `T`.
    pub fn recv<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.dispatch()?;
        classify::decode(&response)
    }

    /// Like [`recv`](Self::recv) but writes into `target`, which is left
    /// untouched on any error.
    pub fn recv_into<T: DeserializeOwned>(self, target: &mut T) -> Result<()> {
        *target = self.recv()?;
        Ok(())
    }

    /// Raw 2xx body.
    pub fn recv_bytes(self) -> Result<Vec<u8>> {
        let response = self.dispatch()?;
        classify::into_body(response)
    }

    fn dispatch(self) -> Result<HttpResponse> {
        let client = self.client;
        let request = self.build()?;
        client.dispatch(request)
    }
}

impl fmt::Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
