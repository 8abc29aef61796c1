//! # Fetch Lifecycle Testing
//!
//! Testing utilities and helpers for fetch lifecycle managers.
//!
//! This crate provides:
//! - Mock implementations of the HTTP client and reporter capabilities
//! - A Given-When-Then harness for reducer methods
//! - Property-based testing strategies
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```
//! use fetch_lifecycle_core::{FetchOptions, Fetcher, ManagerDescriptor, TransportError};
//! use fetch_lifecycle_testing::{MockHttpClient, RecordingReporter};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let client = Arc::new(MockHttpClient::failing(TransportError::new("Network Error")));
//! let reporter = Arc::new(RecordingReporter::new());
//! let content = ManagerDescriptor::new("CONTENT")
//!     .fetcher(Fetcher::new(client.clone()))
//!     .build()
//!     .unwrap();
//!
//! let result = content
//!     .fetch()
//!     .fetch(FetchOptions::new("/content").logger(reporter.clone()))
//!     .await;
//!
//! assert!(result.is_err());
//! assert_eq!(reporter.len(), 1);
//! # });
//! ```

pub mod mocks;

/// Property-based testing utilities
///
/// proptest strategies for resource names, JSON values and state slices.
pub mod properties {
    use fetch_lifecycle_core::{StateSlice, Value, is_truthy};
    use proptest::prelude::*;

    /// Upper-case resource names such as `CONTENT` or `USER_PROFILE`
    pub fn resource_name() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9_]{0,15}"
    }

    /// Small JSON values, nested at most two levels
    pub fn json_value() -> impl Strategy<Value = Value> {
        let scalar = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::from),
            "[a-z ]{0,8}".prop_map(Value::String),
        ];
        scalar.prop_recursive(2, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,5}", inner, 0..4)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    /// JSON values that survive the falsy-skip rule of generated creators
    pub fn truthy_json_value() -> impl Strategy<Value = Value> {
        json_value().prop_filter("value must be truthy", is_truthy)
    }

    /// Arbitrary slices, including keys no reducer method touches
    pub fn state_slice() -> impl Strategy<Value = StateSlice> {
        prop::collection::btree_map("[a-z]{1,8}", json_value(), 0..6).prop_map(|map| {
            StateSlice::from(map.into_iter().collect::<serde_json::Map<_, _>>())
        })
    }
}

/// Install a `tracing` subscriber for tests, honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetch_lifecycle_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{MockHttpClient, RecordedRequest, RecordingReporter, Report};
pub use reducer_test::{SliceReducerTest, assertions};
