//! HTTP client capability consumed by the fetch helper.
//!
//! The core never opens a socket. Anything that can perform a verb-specific
//! request and hand back a JSON body implements [`HttpClient`]:
//!
//! - `ReqwestClient` (in `fetch-lifecycle-transport`): production implementation
//! - `MockHttpClient` (in `fetch-lifecycle-testing`): scripted responses for tests
//!
//! # Dyn Compatibility
//!
//! Requests return a `BoxFuture` instead of using `async fn` so that
//! the client can be shared as `Arc<dyn HttpClient>` by every manager bundle.

use futures::future::BoxFuture;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Future returned by every [`HttpClient`] request.
pub type HttpFuture<'a> = BoxFuture<'a, Result<HttpResponse, TransportError>>;

/// The request verb selected by a fetch's `type` option.
///
/// Unrecognized verbs fall back to [`FetchMethod::Get`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FetchMethod {
    /// Read (`GET`).
    #[default]
    Get,
    /// Create (`POST`).
    Post,
    /// Replace (`PUT`).
    Put,
    /// Partial update (`PATCH`).
    Patch,
    /// Delete (`DELETE`).
    Delete,
}

impl FetchMethod {
    /// Map a verb string onto a method; anything unrecognized is `Get`.
    ///
    /// ```
    /// use fetch_lifecycle_core::FetchMethod;
    ///
    /// assert_eq!(FetchMethod::from_verb("POST"), FetchMethod::Post);
    /// assert_eq!(FetchMethod::from_verb("OPTIONS"), FetchMethod::Get);
    /// ```
    #[must_use]
    pub fn from_verb(verb: &str) -> Self {
        match verb {
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            _ => Self::Get,
        }
    }

    /// The upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FetchMethod {
    fn from(verb: &str) -> Self {
        Self::from_verb(verb)
    }
}

impl Serialize for FetchMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FetchMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let verb = String::deserialize(deserializer)?;
        Ok(Self::from_verb(&verb))
    }
}

/// Transport-specific request configuration.
///
/// The fetch helper passes it through to the client untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestConfig {
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    /// Query-string parameters, in order.
    pub params: Vec<(String, String)>,
    /// JSON request body.
    pub data: Option<Value>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl RequestConfig {
    /// Add a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query-string parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Set the JSON body.
    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The per-request timeout, if set.
    #[must_use]
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// A successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded response body.
    pub data: Value,
}

impl HttpResponse {
    /// A `200 OK` response carrying `data`.
    #[must_use]
    pub const fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }
}

/// Any failure reported by the HTTP client.
///
/// The fetch helper does not classify these further; it logs and returns them.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description.
    pub message: String,
    /// Status code when the server answered with an error status.
    pub status: Option<u16>,
    /// Response body that came with the error status, if any.
    pub data: Option<Value>,
}

impl TransportError {
    /// A transport error with only a message (connection failure, timeout, ...).
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// An error status returned by the server.
    #[must_use]
    pub fn status(status: u16, data: Option<Value>) -> Self {
        Self {
            message: format!("Request failed with status code {status}"),
            status: Some(status),
            data,
        }
    }
}

/// HTTP client capability.
///
/// Implementors provide [`HttpClient::send`]; the verb methods delegate to it.
pub trait HttpClient: Send + Sync {
    /// Perform one request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for connection failures, timeouts and error
    /// statuses.
    fn send<'a>(&'a self, method: FetchMethod, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a>;

    /// `GET locator`.
    fn get<'a>(&'a self, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        self.send(FetchMethod::Get, locator, config)
    }

    /// `POST locator`.
    fn post<'a>(&'a self, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        self.send(FetchMethod::Post, locator, config)
    }

    /// `PUT locator`.
    fn put<'a>(&'a self, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        self.send(FetchMethod::Put, locator, config)
    }

    /// `PATCH locator`.
    fn patch<'a>(&'a self, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        self.send(FetchMethod::Patch, locator, config)
    }

    /// `DELETE locator`.
    fn delete<'a>(&'a self, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        self.send(FetchMethod::Delete, locator, config)
    }
}

/// Client used by [`crate::Fetcher::shared`] until a real one is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredClient;

impl HttpClient for UnconfiguredClient {
    fn send<'a>(&'a self, method: FetchMethod, locator: &'a str, _config: &'a RequestConfig) -> HttpFuture<'a> {
        Box::pin(async move {
            Err(TransportError::new(format!(
                "No HTTP client installed for {method} {locator}"
            )))
        })
    }
}
