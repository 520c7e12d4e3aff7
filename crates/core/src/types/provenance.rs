//! Roster entry provenance.

use serde::{Deserialize, Serialize};

/// Where a roster entry came from.
///
/// `Native` entries matched the scope's affiliation predicate directly.
/// `Visitor` entries belong elsewhere (or nowhere) but have a prescription
/// recorded at the shop in scope. The flag only drives a visual marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    #[default]
    Native,
    Visitor,
}

impl Provenance {
    /// Returns true for visitor entries.
    #[must_use]
    pub const fn is_visitor(self) -> bool {
        matches!(self, Self::Visitor)
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Visitor => write!(f, "visitor"),
        }
    }
}

impl std::str::FromStr for Provenance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(Self::Native),
            "visitor" => Ok(Self::Visitor),
            _ => Err(format!("invalid provenance: {s}")),
        }
    }
}
