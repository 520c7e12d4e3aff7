//! Roster scopes and the scope predicate builder.

use core::fmt;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::ShopId;

/// Filter tokens that select unaffiliated ("particular") clients.
const UNAFFILIATED_TOKENS: &[&str] = &["particular", "unaffiliated"];

/// The set of clients a roster resolution is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "shop_id", rename_all = "snake_case")]
pub enum Scope {
    /// Every client.
    #[default]
    All,
    /// Clients whose home shop is the given shop, plus its visitors.
    Shop(ShopId),
    /// Clients without a home shop.
    Unaffiliated,
}

impl Scope {
    /// Build a scope from a caller-supplied filter token.
    ///
    /// Total: every input maps to a scope.
    ///
    /// - absent or blank → [`Scope::All`]
    /// - `particular` / `unaffiliated` (any case) → [`Scope::Unaffiliated`]
    /// - a UUID → [`Scope::Shop`]
    /// - anything else → `Scope::Shop(ShopId::nil())`, which owns no clients
    ///
    /// ```
    /// use optica_core::{Scope, ShopId};
    ///
    /// assert_eq!(Scope::from_filter(None), Scope::All);
    /// assert_eq!(Scope::from_filter(Some("Particular")), Scope::Unaffiliated);
    /// assert_eq!(Scope::from_filter(Some("bogus")), Scope::Shop(ShopId::nil()));
    /// ```
    #[must_use]
    pub fn from_filter(token: Option<&str>) -> Self {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::All;
        };

        if UNAFFILIATED_TOKENS
            .iter()
            .any(|marker| token.eq_ignore_ascii_case(marker))
        {
            return Self::Unaffiliated;
        }

        Self::Shop(token.parse().unwrap_or_else(|_| ShopId::nil()))
    }

    /// The shop whose visitors must be fetched, if any.
    ///
    /// Only shop scopes have visitors: `All` already contains everyone and
    /// `Unaffiliated` is isolated from shop prescription history.
    #[must_use]
    pub const fn visitor_shop(&self) -> Option<ShopId> {
        match self {
            Self::Shop(id) => Some(*id),
            Self::All | Self::Unaffiliated => None,
        }
    }
}

impl From<Option<ShopId>> for Scope {
    /// Map an optional affiliation to its scope (`None` is unaffiliated).
    fn from(shop: Option<ShopId>) -> Self {
        shop.map_or(Self::Unaffiliated, Self::Shop)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => Ok(()),
            Self::Shop(id) => write!(f, "{id}"),
            Self::Unaffiliated => write!(f, "particular"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_filter(Some(s)))
    }
}
