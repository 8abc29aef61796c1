//! # Fetch Lifecycle Core
//!
//! Generated action types, action creators and reducer methods for remote
//! data fetches in a unidirectional state-update architecture.
//!
//! Applications often have many "fetch resource X" flows that all follow the
//! same lifecycle. Instead of writing four action types, four creators and four
//! reducer branches per resource, describe the resource once and generate them.
//!
//! ## Core Concepts
//!
//! - **Phase**: `initial`, `inProgress`, `success`, `failure`
//! - **Action**: a flat record `{ "type": "<NAME>_FETCH_SUCCESS", ...fields }`
//! - **Action creator**: maps positional arguments onto configured field names
//! - **Reducer method**: pure function `(StateSlice, Action) → StateSlice`
//! - **Manager bundle**: everything generated for one resource, plus the fetch helper
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell: everything except [`Fetcher::fetch`] is
//!   synchronous and side-effect free
//! - Unidirectional Data Flow: this crate produces actions and reducer methods;
//!   dispatching them is the state container's job
//! - Dependency Injection: the HTTP client, the reporter and the reducer
//!   strategy are traits supplied by the caller
//!
//! ## Example
//!
//! ```
//! use fetch_lifecycle_core::{ManagerDescriptor, Phase};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), fetch_lifecycle_core::ManagerError> {
//! let content = ManagerDescriptor::new("CONTENT")
//!     .results_prop_name("articles")
//!     .build()?;
//!
//! let mut slice = content.initial_slice();
//! slice = content.reduce(&slice, &content.in_progress(&[]));
//! assert!(slice.loading());
//!
//! slice = content.reduce(&slice, &content.success(&[json!([{"id": 1}])]));
//! assert_eq!(slice.results("articles"), Some(&json!([{"id": 1}])));
//! assert_eq!(content.phase_of(&content.failure(&[])), Some(Phase::Failure));
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod fetch;
pub mod http;
pub mod manager;
pub mod phase;
pub mod reducer_methods;
pub mod registry;
pub mod reporter;
pub mod slice;

// Re-export commonly used types
pub use action::{Action, ActionCreator, BareActionCreator, is_truthy, make_action_creator};
pub use fetch::{FetchError, FetchOptions, Fetcher, MISSING_CONFIG_MESSAGE};
pub use http::{FetchMethod, HttpClient, HttpFuture, HttpResponse, RequestConfig, TransportError};
pub use manager::{
    ActionBundle, DEFAULT_ARG_NAME, DEFAULT_RESULTS_PROP_NAME, ManagerBundle, ManagerDescriptor,
    ManagerError, create_manager,
};
pub use phase::{Phase, PhaseMap};
pub use reducer_methods::{DefaultReducerMethods, ReducerFn, ReducerMethods, ReducerMethodsGenerator};
pub use registry::ActionTypeRegistry;
pub use reporter::{ConsoleReporter, ErrorReporter, FailureContext, TracingReporter};
pub use slice::StateSlice;
pub use serde_json::{Value, json};
