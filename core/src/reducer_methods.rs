//! Reducer methods: one pure update function per lifecycle phase.
//!
//! A reducer method computes the next [`StateSlice`] from the previous one and
//! an incoming [`Action`]. The built-in policy is [`DefaultReducerMethods`]:
//!
//! | Phase | New slice |
//! |---|---|
//! | `initial` | `loading = false`, `error = null`, results = `null` |
//! | `inProgress` | `loading = true`, `error = null`, results untouched |
//! | `success` | `loading = false`, `error = null`, results = action payload |
//! | `failure` | `loading = false`, `error = action payload`, results untouched |
//!
//! Other strategies can be injected through [`ReducerMethodsGenerator`]; any
//! closure with the right signature qualifies.

use crate::action::Action;
use crate::manager::ActionBundle;
use crate::phase::{Phase, PhaseMap};
use crate::slice::{ERROR_KEY, LOADING_KEY, StateSlice};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A reducer method: `(previous slice, action) -> next slice`.
pub type ReducerFn = Arc<dyn Fn(&StateSlice, &Action) -> StateSlice + Send + Sync>;

/// One reducer method per phase.
#[derive(Clone)]
pub struct ReducerMethods(PhaseMap<ReducerFn>);

impl ReducerMethods {
    /// Wrap a complete set of reducer methods.
    #[must_use]
    pub const fn new(methods: PhaseMap<ReducerFn>) -> Self {
        Self(methods)
    }

    /// The reducer method for `phase`.
    #[must_use]
    pub fn get(&self, phase: Phase) -> &ReducerFn {
        self.0.get(phase)
    }

    /// Apply the reducer method for `phase`.
    #[must_use]
    pub fn reduce(&self, phase: Phase, slice: &StateSlice, action: &Action) -> StateSlice {
        (self.0.get(phase))(slice, action)
    }

    /// Reducer method for [`Phase::Initial`].
    #[must_use]
    pub fn initial(&self, slice: &StateSlice, action: &Action) -> StateSlice {
        self.reduce(Phase::Initial, slice, action)
    }

    /// Reducer method for [`Phase::InProgress`].
    #[must_use]
    pub fn in_progress(&self, slice: &StateSlice, action: &Action) -> StateSlice {
        self.reduce(Phase::InProgress, slice, action)
    }

    /// Reducer method for [`Phase::Success`].
    #[must_use]
    pub fn success(&self, slice: &StateSlice, action: &Action) -> StateSlice {
        self.reduce(Phase::Success, slice, action)
    }

    /// Reducer method for [`Phase::Failure`].
    #[must_use]
    pub fn failure(&self, slice: &StateSlice, action: &Action) -> StateSlice {
        self.reduce(Phase::Failure, slice, action)
    }
}

impl fmt::Debug for ReducerMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerMethods")
            .field("initial", &"<fn>")
            .field("in_progress", &"<fn>")
            .field("success", &"<fn>")
            .field("failure", &"<fn>")
            .finish()
    }
}

/// Strategy that derives reducer methods from a generated action bundle.
///
/// The generator is called exactly once per manager, after every action
/// creator exists.
pub trait ReducerMethodsGenerator: Send + Sync {
    /// Produce reducer methods for `bundle`, storing results under `results_prop_name`.
    fn generate(&self, bundle: &ActionBundle, results_prop_name: &str) -> ReducerMethods;
}

impl<F> ReducerMethodsGenerator for F
where
    F: Fn(&ActionBundle, &str) -> ReducerMethods + Send + Sync,
{
    fn generate(&self, bundle: &ActionBundle, results_prop_name: &str) -> ReducerMethods {
        self(bundle, results_prop_name)
    }
}

/// The built-in loading / error / results policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReducerMethods;

impl ReducerMethodsGenerator for DefaultReducerMethods {
    fn generate(&self, bundle: &ActionBundle, results_prop_name: &str) -> ReducerMethods {
        let results: Arc<str> = Arc::from(results_prop_name);
        let payload_key: Arc<str> = Arc::from(bundle.payload_key());

        ReducerMethods::new(PhaseMap::from_fn(|phase| {
            let results = Arc::clone(&results);
            let payload_key = Arc::clone(&payload_key);
            let method: ReducerFn = match phase {
                Phase::Initial => Arc::new(move |slice: &StateSlice, _: &Action| {
                    slice
                        .clone()
                        .with(LOADING_KEY, Value::Bool(false))
                        .with(ERROR_KEY, Value::Null)
                        .with(&*results, Value::Null)
                }),
                Phase::InProgress => Arc::new(|slice: &StateSlice, _: &Action| {
                    slice
                        .clone()
                        .with(LOADING_KEY, Value::Bool(true))
                        .with(ERROR_KEY, Value::Null)
                }),
                Phase::Success => Arc::new(move |slice: &StateSlice, action: &Action| {
                    slice
                        .clone()
                        .with(LOADING_KEY, Value::Bool(false))
                        .with(ERROR_KEY, Value::Null)
                        .with(&*results, payload(action, &payload_key))
                }),
                Phase::Failure => Arc::new(move |slice: &StateSlice, action: &Action| {
                    slice
                        .clone()
                        .with(LOADING_KEY, Value::Bool(false))
                        .with(ERROR_KEY, payload(action, &payload_key))
                }),
            };
            method
        }))
    }
}

fn payload(action: &Action, key: &str) -> Value {
    action.get(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::manager::ManagerDescriptor;
    use serde_json::json;

    fn methods(results: &str) -> (ActionBundle, ReducerMethods) {
        let manager = ManagerDescriptor::new("TODOS")
            .results_prop_name(results)
            .build()
            .unwrap();
        (manager.bundle().clone(), manager.reducer_methods().clone())
    }

    #[test]
    fn test_initial_resets_slice() {
        let (bundle, methods) = methods("items");
        let previous = StateSlice::new()
            .with(LOADING_KEY, json!(true))
            .with(ERROR_KEY, json!("boom"))
            .with("items", json!([1, 2]))
            .with("page", json!(4));

        let next = methods.initial(&previous, &bundle.actions.initial.create(&[]));

        assert!(!next.loading());
        assert_eq!(next.error(), None);
        assert_eq!(next.results("items"), None);
        assert_eq!(next.get("page"), Some(&json!(4)));
        // Input is untouched
        assert!(previous.loading());
    }

    #[test]
    fn test_in_progress_keeps_results() {
        let (bundle, methods) = methods("results");
        let previous = StateSlice::initial("results")
            .with("results", json!(["cached"]))
            .with(ERROR_KEY, json!("old failure"));

        let next = methods.in_progress(&previous, &bundle.actions.in_progress.create(&[]));

        assert!(next.loading());
        assert_eq!(next.error(), None);
        assert_eq!(next.results("results"), Some(&json!(["cached"])));
    }

    #[test]
    fn test_success_stores_payload_under_configured_name() {
        let (bundle, methods) = methods("articles");
        let action = bundle.actions.success.create(&[json!([{"id": 1}])]);

        let next = methods.success(&StateSlice::initial("articles").with(LOADING_KEY, json!(true)), &action);

        assert!(!next.loading());
        assert_eq!(next.results("articles"), Some(&json!([{"id": 1}])));
        assert_eq!(next.get("results"), None);
    }

    #[test]
    fn test_failure_stores_error_and_keeps_results() {
        let (bundle, methods) = methods("results");
        let previous = StateSlice::initial("results")
            .with(LOADING_KEY, json!(true))
            .with("results", json!([1]));
        let action = bundle.actions.failure.create(&[json!("Network Error")]);

        let next = methods.failure(&previous, &action);

        assert!(!next.loading());
        assert_eq!(next.error(), Some(&json!("Network Error")));
        assert_eq!(next.results("results"), Some(&json!([1])));
    }

    #[test]
    fn test_failure_without_payload_is_total() {
        let (bundle, methods) = methods("results");
        let next = methods.failure(&StateSlice::new(), &bundle.actions.failure.create(&[]));
        assert!(!next.loading());
        assert_eq!(next.error(), None);
    }

    #[test]
    fn test_payload_key_follows_first_arg_name() {
        let manager = ManagerDescriptor::new("USERS")
            .arg_names(["data", "meta"])
            .build()
            .unwrap();
        let action = manager.success(&[json!({"name": "ada"}), json!({"page": 1})]);

        let next = manager
            .reducer_methods()
            .success(&StateSlice::new(), &action);

        assert_eq!(next.results("results"), Some(&json!({"name": "ada"})));
    }

    #[test]
    fn test_closure_generator() {
        let generator = |_: &ActionBundle, _: &str| {
            ReducerMethods::new(PhaseMap::from_fn(|phase| {
                let method: ReducerFn = Arc::new(move |slice: &StateSlice, _: &Action| {
                    slice.clone().with("last_phase", json!(phase.key()))
                });
                method
            }))
        };
        let manager = ManagerDescriptor::new("AUDIT")
            .reducer_methods(Arc::new(generator))
            .build()
            .unwrap();

        let next = manager
            .reducer_methods()
            .in_progress(&StateSlice::new(), &manager.in_progress(&[]));

        assert_eq!(next.get("last_phase"), Some(&json!("inProgress")));
        assert!(!next.loading());
    }
}
