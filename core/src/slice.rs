//! The state slice a resource's reducer methods operate on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the loading flag.
pub const LOADING_KEY: &str = "loading";

/// Key holding the last failure payload.
pub const ERROR_KEY: &str = "error";

/// One resource's slice of application state, as a JSON object.
///
/// Reducer methods never mutate a slice in place; they return a new one with
/// every untouched key carried over. The results property name is chosen per
/// resource, so the slice is keyed dynamically rather than a fixed struct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSlice(Map<String, Value>);

impl StateSlice {
    /// An empty slice with no keys.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// The "not yet fetched" slice: not loading, no error, empty results.
    #[must_use]
    pub fn initial(results_prop_name: &str) -> Self {
        Self::new()
            .with(LOADING_KEY, Value::Bool(false))
            .with(ERROR_KEY, Value::Null)
            .with(results_prop_name, Value::Null)
    }

    /// Return a copy with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// `true` while a fetch is running.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.0.get(LOADING_KEY).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The failure payload, if the last fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&Value> {
        self.0.get(ERROR_KEY).filter(|v| !v.is_null())
    }

    /// The results stored under `results_prop_name`, if any.
    #[must_use]
    pub fn results(&self, results_prop_name: &str) -> Option<&Value> {
        self.0.get(results_prop_name).filter(|v| !v.is_null())
    }

    /// Raw access to any key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The underlying object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the slice and return the underlying object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for StateSlice {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_slice() {
        let slice = StateSlice::initial("items");
        assert!(!slice.loading());
        assert_eq!(slice.error(), None);
        assert_eq!(slice.results("items"), None);
        assert_eq!(slice.get("items"), Some(&Value::Null));
    }

    #[test]
    fn test_with_does_not_touch_other_keys() {
        let slice = StateSlice::new().with("page", json!(3)).with(LOADING_KEY, json!(true));
        assert!(slice.loading());
        assert_eq!(slice.get("page"), Some(&json!(3)));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let slice = StateSlice::initial("results");
        let value = serde_json::to_value(&slice).unwrap_or_default();
        assert_eq!(value, json!({"loading": false, "error": null, "results": null}));
    }
}
