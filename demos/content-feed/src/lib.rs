//! # Content Feed
//!
//! A small feed demonstrating a generated fetch lifecycle manager.
//!
//! The [`FeedStore`] plays the state container: it owns one [`StateSlice`],
//! applies actions through the manager's reducer methods, and logs every
//! dispatch. [`FeedStore::load`] is the usual async flow: dispatch
//! `inProgress`, fetch, then dispatch `success` or `failure`.
//!
//! ## Example
//!
//! ```no_run
//! use content_feed::FeedStore;
//! use fetch_lifecycle_core::ManagerDescriptor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ManagerDescriptor::new("CONTENT").results_prop_name("posts").build()?;
//! let mut store = FeedStore::new(manager);
//!
//! store.load("https://example.com/posts").await;
//! println!("{:?}", store.slice());
//! # Ok(())
//! # }
//! ```

use fetch_lifecycle_core::{
    Action, FetchOptions, ManagerBundle, StateSlice, TracingReporter, Value, json,
};
use std::sync::Arc;

/// Resource name of the feed manager
pub const RESOURCE_NAME: &str = "CONTENT";

/// Slice key the feed stores posts under
pub const RESULTS_PROP_NAME: &str = "posts";

/// Owns the feed slice and applies actions to it
#[derive(Debug)]
pub struct FeedStore {
    manager: ManagerBundle,
    slice: StateSlice,
    dispatched: Vec<Action>,
}

impl FeedStore {
    /// Create a store whose slice starts in the "not yet fetched" shape
    #[must_use]
    pub fn new(manager: ManagerBundle) -> Self {
        let slice = manager.initial_slice();
        Self {
            manager,
            slice,
            dispatched: Vec::new(),
        }
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action_type = action.action_type(), "Dispatching");
        self.slice = self.manager.reduce(&self.slice, &action);
        self.dispatched.push(action);
    }

    /// Fetch `url` and dispatch the lifecycle actions around it
    pub async fn load(&mut self, url: &str) {
        self.dispatch(self.manager.in_progress(&[]));

        let options = FetchOptions::new(url)
            .name("content")
            .logger(Arc::new(TracingReporter))
            .log_data(json!({ "resource": RESOURCE_NAME }));

        let action = match self.manager.fetch().fetch(options).await {
            Ok(body) => self.manager.success(&[body]),
            Err(err) => self.manager.failure(&[json!(err.to_string())]),
        };
        self.dispatch(action);
    }

    /// Return to the "not yet fetched" slice
    pub fn reset(&mut self) {
        self.dispatch(self.manager.initial(&[]));
    }

    /// Current slice
    #[must_use]
    pub const fn slice(&self) -> &StateSlice {
        &self.slice
    }

    /// Every action dispatched so far
    #[must_use]
    pub fn dispatched(&self) -> &[Action] {
        &self.dispatched
    }

    /// Loaded posts, empty unless the last load succeeded with an array
    #[must_use]
    pub fn posts(&self) -> &[Value] {
        self.slice
            .results(self.manager.results_prop_name())
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fetch_lifecycle_core::ManagerDescriptor;

    #[test]
    fn test_new_store_is_not_fetched() {
        let manager = ManagerDescriptor::new(RESOURCE_NAME)
            .results_prop_name(RESULTS_PROP_NAME)
            .build()
            .unwrap();
        let store = FeedStore::new(manager);

        assert!(!store.slice().loading());
        assert!(store.posts().is_empty());
        assert!(store.dispatched().is_empty());
    }

    #[test]
    fn test_reset_dispatches_initial() {
        let manager = ManagerDescriptor::new(RESOURCE_NAME).build().unwrap();
        let mut store = FeedStore::new(manager);

        store.reset();

        assert_eq!(store.dispatched()[0].action_type(), "CONTENT_FETCH_INITIAL");
    }
}
