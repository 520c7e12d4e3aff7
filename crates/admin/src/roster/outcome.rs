//! Result values of a roster resolution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ClientView;

/// A resolution could not produce a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterError {
    /// The primary client fetch failed.
    #[error("client store unavailable")]
    StoreUnavailable,
}

/// A resolution produced a roster that may be missing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterWarning {
    /// The visitor fetch failed; the roster holds native clients only.
    #[error("visitor lookup failed; roster may be missing visitors")]
    PartialVisitorFailure,
}

/// Outcome of resolving a roster.
///
/// Generic over the entry type so call sites can decorate entries while
/// keeping the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterOutcome<T = ClientView> {
    Ok {
        roster: Vec<T>,
    },
    Partial {
        roster: Vec<T>,
        warning: RosterWarning,
    },
    Error {
        reason: RosterError,
    },
}

impl<T> RosterOutcome<T> {
    /// The roster, if one was produced.
    #[must_use]
    pub fn roster(&self) -> Option<&[T]> {
        match self {
            Self::Ok { roster } | Self::Partial { roster, .. } => Some(roster),
            Self::Error { .. } => None,
        }
    }

    /// Consume the outcome, returning the roster if one was produced.
    #[must_use]
    pub fn into_roster(self) -> Option<Vec<T>> {
        match self {
            Self::Ok { roster } | Self::Partial { roster, .. } => Some(roster),
            Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub const fn warning(&self) -> Option<RosterWarning> {
        match self {
            Self::Partial { warning, .. } => Some(*warning),
            Self::Ok { .. } | Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Transform the entries, keeping the status.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> RosterOutcome<U> {
        self.map_roster(|roster| roster.into_iter().map(f).collect())
    }

    /// Transform the whole entry list, keeping the status.
    #[must_use]
    pub fn map_roster<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> RosterOutcome<U> {
        match self {
            Self::Ok { roster } => RosterOutcome::Ok { roster: f(roster) },
            Self::Partial { roster, warning } => RosterOutcome::Partial {
                roster: f(roster),
                warning,
            },
            Self::Error { reason } => RosterOutcome::Error { reason },
        }
    }
}
