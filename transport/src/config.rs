//! Environment-driven transport configuration.

use crate::error::TransportConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the base URL relative locators are joined onto.
pub const BASE_URL_VAR: &str = "FETCH_BASE_URL";

/// Environment variable holding the default timeout in seconds.
pub const TIMEOUT_VAR: &str = "FETCH_TIMEOUT_SECS";

/// Environment variable overriding the `User-Agent` header.
pub const USER_AGENT_VAR: &str = "FETCH_USER_AGENT";

/// Settings for [`ReqwestClient`](crate::ReqwestClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Base URL for locators that are not absolute.
    pub base_url: Option<String>,
    /// Default timeout applied to every request.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("fetch-lifecycle/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    /// Load from `FETCH_BASE_URL`, `FETCH_TIMEOUT_SECS` and `FETCH_USER_AGENT`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TransportConfigError::InvalidValue`] if the timeout is not a
    /// whole number of seconds or the base URL is not http(s).
    pub fn from_env() -> Result<Self, TransportConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Same as [`TransportConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TransportConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(TransportConfigError::InvalidValue {
                    var: BASE_URL_VAR.to_string(),
                    value: base_url,
                });
            }
            config.base_url = Some(base_url);
        }

        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| TransportConfigError::InvalidValue {
                    var: TIMEOUT_VAR.to_string(),
                    value: timeout.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(user_agent) = lookup(USER_AGENT_VAR).filter(|v| !v.is_empty()) {
            config.user_agent = user_agent;
        }

        Ok(config)
    }

    /// Set the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
