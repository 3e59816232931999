//! Blocking JSON REST client with pluggable credentials.
//!
//! # Overview
//! A `RestClient` is bound to one endpoint and, optionally, a
//! `CredentialProvider`. Verb methods return a `RequestBuilder`; its terminal
//! `recv*` methods dispatch the request and classify the response into a
//! decoded value or a typed [`Error`].
//!
//! ```no_run
//! use restapi_core::{BearerToken, RestClient};
//!
//! #[derive(serde::Deserialize)]
//! struct User {
//!     id: String,
//! }
//!
//! let client = RestClient::builder("https://api.example.com")
//!     .credentials(BearerToken::new("token"))
//!     .build();
//! let user: User = client.get(format_args!("/users/{}", 1)).recv()?;
//! # Ok::<(), restapi_core::Error>(())
//! ```
//!
//! # Design
//! - Request building, dispatch and classification are separate steps over
//!   plain-data `HttpRequest` / `HttpResponse` values, so each is testable
//!   without a network.
//! - The network sits behind the `Transport` trait; `UreqTransport` is the
//!   default.
//! - No retries: every failure is returned to the caller of `recv*`.

pub mod auth;
pub mod classify;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use auth::{BearerToken, CredentialProvider, StaticHeaders};
pub use client::{ClientBuilder, RequestBuilder, RestClient};
pub use error::{CredentialError, Error, Result, TransportError};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::ApiError;
