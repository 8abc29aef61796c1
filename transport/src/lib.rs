//! # Fetch Lifecycle Transport
//!
//! Production [`HttpClient`](fetch_lifecycle_core::HttpClient) implementation
//! built on `reqwest`.
//!
//! ## Example
//!
//! ```no_run
//! use fetch_lifecycle_core::{FetchOptions, ManagerDescriptor};
//! use fetch_lifecycle_transport::{TransportConfig, install_default};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads FETCH_BASE_URL, FETCH_TIMEOUT_SECS and FETCH_USER_AGENT
//! install_default(&TransportConfig::from_env()?)?;
//!
//! let content = ManagerDescriptor::new("CONTENT").build()?;
//! let body = content.fetch().fetch(FetchOptions::new("/content")).await?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::ReqwestClient;
pub use config::TransportConfig;
pub use error::TransportConfigError;

use fetch_lifecycle_core::Fetcher;
use std::sync::Arc;

/// Build a [`ReqwestClient`] from `config` and install it behind [`Fetcher::shared`].
///
/// # Errors
///
/// Returns [`TransportConfigError::Build`] if the client cannot be built and
/// [`TransportConfigError::AlreadyInstalled`] if a shared client exists.
pub fn install_default(config: &TransportConfig) -> Result<(), TransportConfigError> {
    let client = ReqwestClient::with_config(config)?;
    Fetcher::install_shared(Arc::new(client)).map_err(|_| TransportConfigError::AlreadyInstalled)?;
    tracing::info!(base_url = ?config.base_url, "Installed shared HTTP client");
    Ok(())
}
