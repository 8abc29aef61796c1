//! The manager generator: resource descriptor in, complete bundle out.
//!
//! ```
//! use fetch_lifecycle_core::{ManagerDescriptor, StateSlice};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), fetch_lifecycle_core::ManagerError> {
//! let content = ManagerDescriptor::new("CONTENT").build()?;
//!
//! assert_eq!(content.action_types().success, "CONTENT_FETCH_SUCCESS");
//!
//! let action = content.success(&[json!(["a", "b"])]);
//! let slice = content.reduce(&StateSlice::initial("results"), &action);
//! assert_eq!(slice.results("results"), Some(&json!(["a", "b"])));
//! # Ok(())
//! # }
//! ```

use crate::action::{Action, ActionCreator};
use crate::fetch::Fetcher;
use crate::phase::{Phase, PhaseMap};
use crate::reducer_methods::{DefaultReducerMethods, ReducerMethods, ReducerMethodsGenerator};
use crate::slice::StateSlice;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Results property name used when the descriptor does not set one.
pub const DEFAULT_RESULTS_PROP_NAME: &str = "results";

/// Argument name used when the descriptor does not set any.
pub const DEFAULT_ARG_NAME: &str = "payload";

/// Errors raised while generating a manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// The descriptor was missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Caller-supplied configuration for one managed resource.
#[derive(Clone)]
pub struct ManagerDescriptor {
    name: String,
    results_prop_name: String,
    reducer_methods: Arc<dyn ReducerMethodsGenerator>,
    arg_names: Vec<String>,
    fetcher: Option<Fetcher>,
}

impl ManagerDescriptor {
    /// Start a descriptor for the resource `name`.
    ///
    /// The name is used verbatim as the prefix of every action type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results_prop_name: DEFAULT_RESULTS_PROP_NAME.to_string(),
            reducer_methods: Arc::new(DefaultReducerMethods),
            arg_names: vec![DEFAULT_ARG_NAME.to_string()],
            fetcher: None,
        }
    }

    /// Slice key the success reducer stores payloads under.
    #[must_use]
    pub fn results_prop_name(mut self, name: impl Into<String>) -> Self {
        self.results_prop_name = name.into();
        self
    }

    /// Replace the reducer-generation strategy.
    #[must_use]
    pub fn reducer_methods(mut self, generator: Arc<dyn ReducerMethodsGenerator>) -> Self {
        self.reducer_methods = generator;
        self
    }

    /// Argument names action creators map positional arguments onto.
    #[must_use]
    pub fn arg_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Use `fetcher` instead of [`Fetcher::shared`].
    #[must_use]
    pub fn fetcher(mut self, fetcher: Fetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Generate the manager bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Configuration`] if the name is empty.
    pub fn build(self) -> Result<ManagerBundle, ManagerError> {
        create_manager(Some(self))
    }
}

impl fmt::Debug for ManagerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerDescriptor")
            .field("name", &self.name)
            .field("results_prop_name", &self.results_prop_name)
            .field("arg_names", &self.arg_names)
            .field("custom_fetcher", &self.fetcher.is_some())
            .finish_non_exhaustive()
    }
}

/// Type identifiers and action creators for one resource.
///
/// This is what a [`ReducerMethodsGenerator`] receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBundle {
    /// The resource name.
    pub name: String,
    /// Phase key to action type identifier.
    pub action_types: PhaseMap<String>,
    /// Every action type identifier mapped to itself.
    pub action_type_keys: BTreeMap<String, String>,
    /// Phase key to action creator.
    pub actions: PhaseMap<ActionCreator>,
    /// Argument names shared by the creators.
    pub arg_names: Arc<[String]>,
}

impl ActionBundle {
    fn generate(name: &str, arg_names: Vec<String>) -> Self {
        let arg_names: Arc<[String]> = arg_names.into();
        let action_types = PhaseMap::from_fn(|phase| phase.action_type(name));
        let action_type_keys = action_types
            .iter()
            .map(|(_, action_type)| (action_type.clone(), action_type.clone()))
            .collect();
        let actions = action_types.map(|_, action_type| {
            ActionCreator::new(action_type.clone(), Arc::clone(&arg_names))
        });

        Self {
            name: name.to_string(),
            action_types,
            action_type_keys,
            actions,
            arg_names,
        }
    }

    /// Field of an action that carries the fetch payload: the first argument name.
    #[must_use]
    pub fn payload_key(&self) -> &str {
        self.arg_names.first().map_or(DEFAULT_ARG_NAME, String::as_str)
    }

    /// The phase whose identifier equals `action_type`.
    #[must_use]
    pub fn phase_of(&self, action_type: &str) -> Option<Phase> {
        self.action_types
            .iter()
            .find(|(_, candidate)| candidate.as_str() == action_type)
            .map(|(phase, _)| phase)
    }
}

/// Everything generated for one resource.
#[derive(Debug, Clone)]
pub struct ManagerBundle {
    bundle: ActionBundle,
    results_prop_name: String,
    reducer_methods: ReducerMethods,
    fetch: Fetcher,
}

/// Generate a manager bundle from a descriptor.
///
/// Identifiers and creators for all four phases are built first; the reducer
/// generator then runs exactly once over the complete action bundle.
///
/// # Errors
///
/// Returns [`ManagerError::Configuration`] when the descriptor is absent or
/// its name is empty.
pub fn create_manager(descriptor: Option<ManagerDescriptor>) -> Result<ManagerBundle, ManagerError> {
    let descriptor = descriptor.ok_or_else(|| {
        ManagerError::Configuration("Missing descriptor for manager".to_string())
    })?;

    if descriptor.name.is_empty() {
        return Err(ManagerError::Configuration(
            "Missing resource name for manager".to_string(),
        ));
    }

    let bundle = ActionBundle::generate(&descriptor.name, descriptor.arg_names);
    let reducer_methods = descriptor
        .reducer_methods
        .generate(&bundle, &descriptor.results_prop_name);
    let fetch = descriptor.fetcher.unwrap_or_else(Fetcher::shared);

    tracing::debug!(
        name = %bundle.name,
        results_prop_name = %descriptor.results_prop_name,
        "Generated fetch lifecycle manager"
    );

    Ok(ManagerBundle {
        bundle,
        results_prop_name: descriptor.results_prop_name,
        reducer_methods,
        fetch,
    })
}

impl ManagerBundle {
    /// The resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.bundle.name
    }

    /// Type identifiers and creators.
    #[must_use]
    pub const fn bundle(&self) -> &ActionBundle {
        &self.bundle
    }

    /// Phase key to action type identifier.
    #[must_use]
    pub const fn action_types(&self) -> &PhaseMap<String> {
        &self.bundle.action_types
    }

    /// Flat set of identifiers, each mapped to itself.
    #[must_use]
    pub const fn action_type_keys(&self) -> &BTreeMap<String, String> {
        &self.bundle.action_type_keys
    }

    /// Phase key to action creator.
    #[must_use]
    pub const fn actions(&self) -> &PhaseMap<ActionCreator> {
        &self.bundle.actions
    }

    /// Phase key to reducer method.
    #[must_use]
    pub const fn reducer_methods(&self) -> &ReducerMethods {
        &self.reducer_methods
    }

    /// The fetch helper.
    #[must_use]
    pub const fn fetch(&self) -> &Fetcher {
        &self.fetch
    }

    /// The slice key results are stored under.
    #[must_use]
    pub fn results_prop_name(&self) -> &str {
        &self.results_prop_name
    }

    /// Create the [`Phase::Initial`] action.
    #[must_use]
    pub fn initial(&self, args: &[Value]) -> Action {
        self.bundle.actions.initial.create(args)
    }

    /// Create the [`Phase::InProgress`] action.
    #[must_use]
    pub fn in_progress(&self, args: &[Value]) -> Action {
        self.bundle.actions.in_progress.create(args)
    }

    /// Create the [`Phase::Success`] action.
    #[must_use]
    pub fn success(&self, args: &[Value]) -> Action {
        self.bundle.actions.success.create(args)
    }

    /// Create the [`Phase::Failure`] action.
    #[must_use]
    pub fn failure(&self, args: &[Value]) -> Action {
        self.bundle.actions.failure.create(args)
    }

    /// The phase an action of this resource belongs to.
    #[must_use]
    pub fn phase_of(&self, action: &Action) -> Option<Phase> {
        self.bundle.phase_of(action.action_type())
    }

    /// A slice in the "not yet fetched" shape for this resource.
    #[must_use]
    pub fn initial_slice(&self) -> StateSlice {
        StateSlice::initial(&self.results_prop_name)
    }

    /// Route `action` to the matching reducer method.
    ///
    /// Actions of other resources leave the slice unchanged.
    #[must_use]
    pub fn reduce(&self, slice: &StateSlice, action: &Action) -> StateSlice {
        match self.phase_of(action) {
            Some(phase) => self.reducer_methods.reduce(phase, slice, action),
            None => slice.clone(),
        }
    }
}
