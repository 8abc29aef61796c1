//! The four lifecycle phases of a remote fetch and a fixed-size record keyed by them.
//!
//! Every resource managed by this crate moves through the same lifecycle:
//!
//! | Phase | Key | Type suffix |
//! |---|---|---|
//! | [`Phase::Initial`] | `initial` | `FETCH_INITIAL` |
//! | [`Phase::InProgress`] | `inProgress` | `FETCH_IN_PROGRESS` |
//! | [`Phase::Success`] | `success` | `FETCH_SUCCESS` |
//! | [`Phase::Failure`] | `failure` | `FETCH_FAILED` |
//!
//! The table is a constant of the system. [`PhaseMap`] stores one value per
//! phase, so a bundle can never be missing a phase.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lifecycle phase of a remote data fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// The fetch has not started yet.
    Initial,
    /// The fetch is running.
    InProgress,
    /// The fetch completed with a response body.
    Success,
    /// The fetch failed.
    Failure,
}

impl Phase {
    /// All phases, in the order bundles are generated.
    pub const ALL: [Self; 4] = [Self::Initial, Self::InProgress, Self::Success, Self::Failure];

    /// Human-readable key used for `actionTypes`, `actions` and `reducerMethods`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::InProgress => "inProgress",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// Suffix appended to the resource name to form the action type identifier.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Initial => "FETCH_INITIAL",
            Self::InProgress => "FETCH_IN_PROGRESS",
            Self::Success => "FETCH_SUCCESS",
            Self::Failure => "FETCH_FAILED",
        }
    }

    /// Look a phase up by its key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.key() == key)
    }

    /// Build the namespaced action type identifier for `name`.
    ///
    /// ```
    /// use fetch_lifecycle_core::Phase;
    ///
    /// assert_eq!(Phase::Success.action_type("CONTENT"), "CONTENT_FETCH_SUCCESS");
    /// ```
    #[must_use]
    pub fn action_type(self, name: &str) -> String {
        format!("{name}_{}", self.suffix())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when parsing a string that is not a phase key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown lifecycle phase: {0}")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownPhase(s.to_string()))
    }
}

/// One value per [`Phase`].
///
/// Used for action types, action creators and reducer methods. Because the
/// record always has four fields, partial bundles cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseMap<T> {
    /// Value for [`Phase::Initial`].
    pub initial: T,
    /// Value for [`Phase::InProgress`].
    pub in_progress: T,
    /// Value for [`Phase::Success`].
    pub success: T,
    /// Value for [`Phase::Failure`].
    pub failure: T,
}

impl<T> PhaseMap<T> {
    /// Build a map by calling `f` once per phase, in [`Phase::ALL`] order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Phase) -> T,
    {
        Self {
            initial: f(Phase::Initial),
            in_progress: f(Phase::InProgress),
            success: f(Phase::Success),
            failure: f(Phase::Failure),
        }
    }

    /// Borrow the value for `phase`.
    #[must_use]
    pub const fn get(&self, phase: Phase) -> &T {
        match phase {
            Phase::Initial => &self.initial,
            Phase::InProgress => &self.in_progress,
            Phase::Success => &self.success,
            Phase::Failure => &self.failure,
        }
    }

    /// Iterate `(phase, value)` pairs in [`Phase::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &T)> {
        Phase::ALL.into_iter().map(move |phase| (phase, self.get(phase)))
    }

    /// Transform every value, keeping the phase association.
    pub fn map<U, F>(&self, mut f: F) -> PhaseMap<U>
    where
        F: FnMut(Phase, &T) -> U,
    {
        PhaseMap::from_fn(|phase| f(phase, self.get(phase)))
    }
}
