//! Flat export set of action types across many managers.
//!
//! Resource names must be unique within a process. Registering two managers
//! with the same name overwrites the earlier identifiers; the overwrite is
//! logged but not rejected.

use crate::manager::ManagerBundle;
use std::collections::BTreeMap;

/// Every registered action type, mapped to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTypeRegistry {
    types: BTreeMap<String, String>,
}

impl ActionTypeRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Add the four identifiers of `manager`.
    pub fn register(&mut self, manager: &ManagerBundle) -> &mut Self {
        for (key, value) in manager.action_type_keys() {
            if self.types.insert(key.clone(), value.clone()).is_some() {
                tracing::warn!(
                    action_type = %key,
                    resource = manager.name(),
                    "Action type registered twice; previous entry overwritten"
                );
            }
        }
        self
    }

    /// `true` if `action_type` has been registered.
    #[must_use]
    pub fn contains(&self, action_type: &str) -> bool {
        self.types.contains_key(action_type)
    }

    /// Number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// The underlying self-mapped set.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, String> {
        &self.types
    }
}
