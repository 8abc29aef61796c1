//! Mock implementations of the fetch capabilities
//!
//! - [`MockHttpClient`]: scripted responses, records every request
//! - [`RecordingReporter`]: captures every failure report

use fetch_lifecycle_core::{
    ErrorReporter, FailureContext, FetchMethod, HttpClient, HttpFuture, HttpResponse,
    RequestConfig, TransportError, Value,
};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One request seen by [`MockHttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Verb used
    pub method: FetchMethod,
    /// Locator passed to the client
    pub locator: String,
    /// Configuration passed to the client
    pub config: RequestConfig,
}

/// HTTP client that answers from a script.
///
/// Queued outcomes are consumed in order; once the queue is empty every
/// request gets the fallback outcome (`200` with a `null` body unless changed).
///
/// # Example
///
/// ```
/// use fetch_lifecycle_core::{FetchOptions, Fetcher, json};
/// use fetch_lifecycle_testing::MockHttpClient;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let client = Arc::new(MockHttpClient::new());
/// client.respond_with(json!({"items": []}));
///
/// let fetcher = Fetcher::new(client.clone());
/// let body = fetcher.fetch(FetchOptions::new("/items")).await.unwrap();
///
/// assert_eq!(body, json!({"items": []}));
/// assert_eq!(client.request_count(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct MockHttpClient {
    queue: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    fallback: Mutex<Result<HttpResponse, TransportError>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    /// Create a mock that answers every request with `200` and a `null` body
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Ok(HttpResponse::ok(Value::Null))),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose fallback outcome is `error`
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        let mock = Self::new();
        *lock(&mock.fallback) = Err(error);
        mock
    }

    /// Queue a `200` response carrying `data`
    pub fn respond_with(&self, data: Value) -> &Self {
        self.enqueue(Ok(HttpResponse::ok(data)))
    }

    /// Queue a failure
    pub fn fail_with(&self, error: TransportError) -> &Self {
        self.enqueue(Err(error))
    }

    /// Queue an arbitrary outcome
    pub fn enqueue(&self, outcome: Result<HttpResponse, TransportError>) -> &Self {
        lock(&self.queue).push_back(outcome);
        self
    }

    /// All requests seen so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests seen so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Forget recorded requests and queued outcomes (for test isolation)
    pub fn reset(&self) {
        lock(&self.requests).clear();
        lock(&self.queue).clear();
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for MockHttpClient {
    fn send<'a>(&'a self, method: FetchMethod, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        lock(&self.requests).push(RecordedRequest {
            method,
            locator: locator.to_string(),
            config: config.clone(),
        });
        let outcome = lock(&self.queue)
            .pop_front()
            .unwrap_or_else(|| lock(&self.fallback).clone());
        Box::pin(async move { outcome })
    }
}

/// One failure report captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The error the client returned
    pub error: TransportError,
    /// Extra context from the fetch options
    pub log_data: Option<Value>,
    /// The reporter message
    pub message: String,
}

/// Reporter that stores every report for later assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports so far, oldest first
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        lock(&self.reports).clone()
    }

    /// Number of reports so far
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.reports).len()
    }

    /// `true` if nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.reports).is_empty()
    }
}

impl ErrorReporter for RecordingReporter {
    fn error(&self, context: &FailureContext<'_>, message: &str) {
        lock(&self.reports).push(Report {
            error: context.error.clone(),
            log_data: context.log_data.cloned(),
            message: message.to_string(),
        });
    }
}
