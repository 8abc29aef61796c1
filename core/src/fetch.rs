//! The fetch helper: one request, normalized success and failure handling.
//!
//! ```no_run
//! use fetch_lifecycle_core::{FetchOptions, ManagerDescriptor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let content = ManagerDescriptor::new("CONTENT").build()?;
//!
//! let body = content
//!     .fetch()
//!     .fetch(FetchOptions::new("/api/content").name("content"))
//!     .await?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```
//!
//! The helper is single-shot: no retries, no timeout of its own, no
//! cancellation. It only decides which verb to call, unwraps the body on
//! success, and on failure notifies the reporter before returning the
//! original error.

use crate::http::{FetchMethod, HttpClient, RequestConfig, TransportError, UnconfiguredClient};
use crate::reporter::{ConsoleReporter, ErrorReporter, FailureContext};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::Instrument;

/// Message of the error returned when no query was supplied.
pub const MISSING_CONFIG_MESSAGE: &str = "Missing Config Parameters For Fetch";

static SHARED: OnceLock<Arc<dyn HttpClient>> = OnceLock::new();

/// Errors returned by [`Fetcher::fetch`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Options were missing; no request was made.
    #[error("{0}")]
    Configuration(String),

    /// The HTTP client failed; the error is returned unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Options for a single fetch.
///
/// `FetchOptions::default()` carries no query and stands for "no options".
#[derive(Clone, Default)]
pub struct FetchOptions {
    query: Option<String>,
    name: Option<String>,
    logger: Option<Arc<dyn ErrorReporter>>,
    log_data: Option<Value>,
    config: RequestConfig,
    method: FetchMethod,
}

impl FetchOptions {
    /// Options targeting `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Label used in the failure message.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reporter notified on failure. Defaults to [`ConsoleReporter`].
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn ErrorReporter>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Extra context handed to the reporter on failure.
    #[must_use]
    pub fn log_data(mut self, log_data: Value) -> Self {
        self.log_data = Some(log_data);
        self
    }

    /// Transport configuration, passed through to the client.
    #[must_use]
    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    /// Request verb.
    #[must_use]
    pub const fn method(mut self, method: FetchMethod) -> Self {
        self.method = method;
        self
    }

    /// Request verb by name; unknown verbs mean `GET`.
    #[must_use]
    pub fn verb(self, verb: &str) -> Self {
        self.method(FetchMethod::from_verb(verb))
    }

    /// The target locator, if set.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The selected verb.
    #[must_use]
    pub const fn selected_method(&self) -> FetchMethod {
        self.method
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("query", &self.query)
            .field("name", &self.name)
            .field("custom_logger", &self.logger.is_some())
            .field("log_data", &self.log_data)
            .field("config", &self.config)
            .field("method", &self.method)
            .finish()
    }
}

/// Fetch helper bound to an [`HttpClient`].
///
/// Cloning shares the client; the helper itself holds no other state.
#[derive(Clone)]
pub struct Fetcher {
    /// `None` resolves the shared client on every request.
    client: Option<Arc<dyn HttpClient>>,
}

impl Fetcher {
    /// A fetcher using `client`.
    #[must_use]
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// The process-wide fetcher shared by every bundle that does not set its own.
    ///
    /// The client is looked up when a request is made, so bundles built before
    /// [`Fetcher::install_shared`] pick up the installed client. Until then,
    /// requests fail with a transport error naming the missing client.
    #[must_use]
    pub const fn shared() -> Self {
        Self { client: None }
    }

    /// `true` if this fetcher follows the shared client.
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.client.is_none()
    }

    fn client(&self) -> Arc<dyn HttpClient> {
        match &self.client {
            Some(client) => Arc::clone(client),
            None => SHARED
                .get()
                .cloned()
                .unwrap_or_else(|| Arc::new(UnconfiguredClient)),
        }
    }

    /// Install the client behind [`Fetcher::shared`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] if a shared client is already installed.
    pub fn install_shared(client: Arc<dyn HttpClient>) -> Result<(), FetchError> {
        SHARED.set(client).map_err(|_| {
            FetchError::Configuration("Shared HTTP client is already installed".to_string())
        })
    }

    /// Perform one request.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Configuration`] with [`MISSING_CONFIG_MESSAGE`] when no
    ///   query, or an empty one, was given. The client is not called.
    /// - [`FetchError::Transport`] with the client's error, after the reporter
    ///   has been called once.
    pub async fn fetch(&self, options: FetchOptions) -> Result<Value, FetchError> {
        let Some(query) = options.query.as_deref().filter(|q| !q.is_empty()) else {
            return Err(FetchError::Configuration(MISSING_CONFIG_MESSAGE.to_string()));
        };

        let span = tracing::debug_span!(
            "fetch",
            method = %options.method,
            query,
            name = options.name.as_deref()
        );

        let client = self.client();

        async {
            let config = &options.config;
            let result = match options.method {
                FetchMethod::Get => client.get(query, config).await,
                FetchMethod::Post => client.post(query, config).await,
                FetchMethod::Put => client.put(query, config).await,
                FetchMethod::Patch => client.patch(query, config).await,
                FetchMethod::Delete => client.delete(query, config).await,
            };

            match result {
                Ok(response) => {
                    tracing::debug!(status = response.status, "Fetch succeeded");
                    Ok(response.data)
                },
                Err(error) => {
                    tracing::warn!(%error, status = ?error.status, "Fetch failed");
                    let message = failure_message(options.name.as_deref());
                    let context = FailureContext {
                        error: &error,
                        log_data: options.log_data.as_ref(),
                    };
                    match &options.logger {
                        Some(logger) => logger.error(&context, &message),
                        None => ConsoleReporter.error(&context, &message),
                    }
                    Err(FetchError::Transport(error))
                },
            }
        }
        .instrument(span)
        .await
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("shared", &self.is_shared())
            .finish_non_exhaustive()
    }
}

fn failure_message(name: Option<&str>) -> String {
    name.map_or_else(|| "Fetch Failed".to_string(), |name| format!("Fetch {name} Failed"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::http::{HttpFuture, HttpResponse};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records calls and answers with a fixed outcome.
    struct StubClient {
        calls: Mutex<Vec<(FetchMethod, String, RequestConfig)>>,
        outcome: Result<HttpResponse, TransportError>,
    }

    impl StubClient {
        fn new(outcome: Result<HttpResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcome,
            })
        }
    }

    impl HttpClient for StubClient {
        fn send<'a>(&'a self, method: FetchMethod, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
            self.calls
                .lock()
                .unwrap()
                .push((method, locator.to_string(), config.clone()));
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(Value, String)>>);

    impl ErrorReporter for Recorder {
        fn error(&self, context: &FailureContext<'_>, message: &str) {
            let context = serde_json::to_value(context).unwrap();
            self.0.lock().unwrap().push((context, message.to_string()));
        }
    }

    #[tokio::test]
    async fn test_missing_query_rejects_without_calling_client() {
        let client = StubClient::new(Ok(HttpResponse::ok(json!(null))));
        let fetcher = Fetcher::new(client.clone());

        let err = fetcher.fetch(FetchOptions::default()).await.unwrap_err();

        assert_eq!(err, FetchError::Configuration(MISSING_CONFIG_MESSAGE.to_string()));
        assert_eq!(err.to_string(), "Missing Config Parameters For Fetch");
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_rejects_without_calling_client() {
        let client = StubClient::new(Ok(HttpResponse::ok(json!(null))));
        let fetcher = Fetcher::new(client.clone());

        let err = fetcher.fetch(FetchOptions::new("")).await.unwrap_err();

        assert_eq!(err, FetchError::Configuration(MISSING_CONFIG_MESSAGE.to_string()));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_options_builder() {
        let options = FetchOptions::new("/items").verb("DELETE");
        assert_eq!(options.query(), Some("/items"));
        assert_eq!(options.selected_method(), FetchMethod::Delete);

        let options = FetchOptions::default().verb("delete");
        assert_eq!(options.query(), None);
        assert_eq!(options.selected_method(), FetchMethod::Get);
    }

    #[test]
    fn test_shared_fetcher_is_resolved_lazily() {
        assert!(Fetcher::shared().is_shared());
        assert!(!Fetcher::new(StubClient::new(Ok(HttpResponse::ok(json!(null))))).is_shared());
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let client = StubClient::new(Ok(HttpResponse::ok(json!({"items": [1, 2]}))));
        let fetcher = Fetcher::new(client.clone());

        let body = fetcher.fetch(FetchOptions::new("/items")).await.unwrap();

        assert_eq!(body, json!({"items": [1, 2]}));
        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, FetchMethod::Get);
        assert_eq!(calls[0].1, "/items");
    }

    #[tokio::test]
    async fn test_verb_and_config_pass_through() {
        let client = StubClient::new(Ok(HttpResponse::ok(json!("created"))));
        let fetcher = Fetcher::new(client.clone());
        let config = RequestConfig::default().data(json!({"title": "x"}));

        fetcher
            .fetch(FetchOptions::new("/x").verb("POST").config(config.clone()))
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, FetchMethod::Post);
        assert_eq!(calls[0].2, config);
    }

    #[tokio::test]
    async fn test_failure_reports_once_then_propagates() {
        let transport_error = TransportError::status(500, None);
        let client = StubClient::new(Err(transport_error.clone()));
        let recorder = Arc::new(Recorder::default());
        let fetcher = Fetcher::new(client);

        let err = fetcher
            .fetch(
                FetchOptions::new("/x")
                    .name("content")
                    .logger(recorder.clone())
                    .log_data(json!({"page": 2})),
            )
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Transport(transport_error));
        let reports = recorder.0.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].1, "Fetch content Failed");
        assert_eq!(reports[0].0["err"]["status"], json!(500));
        assert_eq!(reports[0].0["logData"], json!({"page": 2}));
    }

    #[tokio::test]
    async fn test_failure_without_name_uses_generic_message() {
        let client = StubClient::new(Err(TransportError::new("Network Error")));
        let recorder = Arc::new(Recorder::default());

        let _ = Fetcher::new(client)
            .fetch(FetchOptions::new("/x").logger(recorder.clone()))
            .await;

        let reports = recorder.0.lock().unwrap();
        assert_eq!(reports[0].1, "Fetch Failed");
        assert!(reports[0].0.get("logData").is_none());
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(failure_message(None), "Fetch Failed");
        assert_eq!(failure_message(Some("users")), "Fetch users Failed");
    }
}
