//! `reqwest` implementation of the HTTP client capability

use crate::config::TransportConfig;
use crate::error::TransportConfigError;
use fetch_lifecycle_core::{
    FetchMethod, HttpClient, HttpFuture, HttpResponse, RequestConfig, TransportError,
};
use reqwest::{Client, Response};
use serde_json::Value;

/// HTTP client backed by `reqwest`.
///
/// Error statuses (anything outside 2xx) are returned as [`TransportError`]
/// carrying the status code and decoded body.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: Client,
    base_url: Option<String>,
}

impl ReqwestClient {
    /// Create a client with [`TransportConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportConfigError::Build`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportConfigError> {
        Self::with_config(&TransportConfig::default())
    }

    /// Create a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`TransportConfigError::Build`] if the TLS backend cannot be initialized.
    pub fn with_config(config: &TransportConfig) -> Result<Self, TransportConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportConfigError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve `locator` against the base URL, unless it is already absolute.
    #[must_use]
    pub fn resolve(&self, locator: &str) -> String {
        match &self.base_url {
            Some(base) if !is_absolute(locator) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                locator.trim_start_matches('/')
            ),
            _ => locator.to_string(),
        }
    }

    async fn execute(
        &self,
        method: FetchMethod,
        locator: &str,
        config: &RequestConfig,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(locator);
        let mut request = match method {
            FetchMethod::Get => self.client.get(&url),
            FetchMethod::Post => self.client.post(&url),
            FetchMethod::Put => self.client.put(&url),
            FetchMethod::Patch => self.client.patch(&url),
            FetchMethod::Delete => self.client.delete(&url),
        };

        for (name, value) in &config.headers {
            request = request.header(name, value);
        }
        if !config.params.is_empty() {
            request = request.query(&config.params);
        }
        if let Some(data) = &config.data {
            request = request.json(data);
        }
        if let Some(timeout) = config.timeout_duration() {
            request = request.timeout(timeout);
        }

        tracing::trace!(%method, %url, "Sending request");

        let response = request.send().await.map_err(|e| TransportError {
            message: e.to_string(),
            status: e.status().map(|s| s.as_u16()),
            data: None,
        })?;

        let status = response.status();
        let data = decode_body(response).await?;

        if status.is_success() {
            Ok(HttpResponse {
                status: status.as_u16(),
                data,
            })
        } else {
            let data = (!data.is_null()).then_some(data);
            Err(TransportError::status(status.as_u16(), data))
        }
    }
}

impl HttpClient for ReqwestClient {
    fn send<'a>(&'a self, method: FetchMethod, locator: &'a str, config: &'a RequestConfig) -> HttpFuture<'a> {
        Box::pin(self.execute(method, locator, config))
    }
}

fn is_absolute(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Empty bodies become `null`; bodies that are not JSON become a JSON string.
async fn decode_body(response: Response) -> Result<Value, TransportError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| TransportError::new(format!("Failed to read response: {e}")))?;

    if bytes.is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
}
