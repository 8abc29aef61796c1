//! Actions and the two families of action creators.
//!
//! An [`Action`] is a flat keyed record with a mandatory `type` field. It
//! serializes to exactly that shape:
//!
//! ```
//! use fetch_lifecycle_core::action::make_action_creator;
//! use serde_json::json;
//!
//! let add_todo = make_action_creator("ADD_TODO", ["text"]);
//! let action = add_todo.create(&[json!("hi")]);
//!
//! assert_eq!(
//!     serde_json::to_value(&action).ok(),
//!     Some(json!({ "type": "ADD_TODO", "text": "hi" }))
//! );
//! ```
//!
//! # Creator families
//!
//! - [`ActionCreator`] is generated per lifecycle phase by the manager. It
//!   **skips falsy arguments**: `null`, `false`, `0` and `""` never produce a
//!   field. Downstream reducers may rely on the omission, so the quirk is kept.
//! - [`BareActionCreator`] is built by [`make_action_creator`]. It always
//!   writes every configured field, whatever the value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A dispatched action: `{ "type": <identifier>, ...fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Action {
    /// Create an action with no fields besides `type`.
    #[must_use]
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            fields: Map::new(),
        }
    }

    /// Add or replace a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The action type identifier.
    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Look up a field other than `type`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields other than `type`.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Number of fields other than `type`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the action carries nothing but its type.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Falsy values are `null`, `false`, numeric zero and the empty string.
///
/// Empty arrays and empty objects are truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Creator for one lifecycle phase of a managed resource.
///
/// Cloning is cheap; the argument-name list is shared between the four
/// creators of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCreator {
    action_type: String,
    arg_names: Arc<[String]>,
}

impl ActionCreator {
    pub(crate) fn new(action_type: String, arg_names: Arc<[String]>) -> Self {
        Self {
            action_type,
            arg_names,
        }
    }

    /// The identifier every created action carries.
    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Configured argument names, in positional order.
    #[must_use]
    pub fn arg_names(&self) -> &[String] {
        &self.arg_names
    }

    /// Build an action from positional arguments.
    ///
    /// Falsy arguments and missing positions are omitted. Arguments past the
    /// configured names are dropped.
    #[must_use]
    pub fn create(&self, args: &[Value]) -> Action {
        let fields = self
            .arg_names
            .iter()
            .zip(args)
            .filter(|(_, value)| is_truthy(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Action {
            action_type: self.action_type.clone(),
            fields,
        }
    }
}

/// Creator built by [`make_action_creator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BareActionCreator {
    action_type: String,
    arg_names: Vec<String>,
}

impl BareActionCreator {
    /// The identifier every created action carries.
    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Build an action with one field per configured name.
    ///
    /// Values are copied as given, falsy or not; a missing position becomes `null`.
    #[must_use]
    pub fn create(&self, args: &[Value]) -> Action {
        let fields = self
            .arg_names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), args.get(index).cloned().unwrap_or(Value::Null)))
            .collect();

        Action {
            action_type: self.action_type.clone(),
            fields,
        }
    }
}

/// Build a single action creator from a type and a fixed parameter list.
///
/// ```
/// use fetch_lifecycle_core::action::make_action_creator;
/// use serde_json::json;
///
/// let set_count = make_action_creator("SET_COUNT", ["count"]);
/// let action = set_count.create(&[json!(0)]);
/// assert_eq!(action.get("count"), Some(&json!(0)));
/// ```
#[must_use]
pub fn make_action_creator<I, S>(action_type: impl Into<String>, arg_names: I) -> BareActionCreator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    BareActionCreator {
        action_type: action_type.into(),
        arg_names: arg_names.into_iter().map(Into::into).collect(),
    }
}
