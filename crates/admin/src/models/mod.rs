//! Domain models for admin.
//!
//! - [`shop`] - Optical shops
//! - [`client`] - Patients, optionally affiliated with a home shop
//! - [`prescription`] - Dated prescription ("receita") records

pub mod client;
pub mod prescription;
pub mod shop;

use serde::{Deserialize, Serialize};

use optica_core::{Scope, ShopId};

pub use client::{Client, ClientOrder, ClientQuery, CreateClientInput};
pub use prescription::{
    CreatePrescriptionInput, EyeMeasurements, Payer, PayerParseError, Prescription,
    PrescriptionOrder, PrescriptionQuery, PrescriptionRecord, ServiceType,
};
pub use shop::{CreateShopInput, Shop, ShopOrder, ShopQuery};

/// Predicate on a nullable shop reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Affiliation {
    /// No constraint.
    #[default]
    Any,
    /// Equal to the given shop.
    Shop(ShopId),
    /// The reference is absent.
    Unaffiliated,
}

impl Affiliation {
    /// Evaluate the predicate against a shop reference.
    #[must_use]
    pub fn matches(&self, shop: Option<ShopId>) -> bool {
        match self {
            Self::Any => true,
            Self::Shop(id) => shop == Some(*id),
            Self::Unaffiliated => shop.is_none(),
        }
    }
}

impl From<Scope> for Affiliation {
    /// The home-shop predicate selecting a scope's native clients.
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => Self::Any,
            Scope::Shop(id) => Self::Shop(id),
            Scope::Unaffiliated => Self::Unaffiliated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affiliation_matches() {
        let shop = ShopId::new_random();
        let other = ShopId::new_random();

        assert!(Affiliation::Any.matches(None));
        assert!(Affiliation::Any.matches(Some(shop)));
        assert!(Affiliation::Shop(shop).matches(Some(shop)));
        assert!(!Affiliation::Shop(shop).matches(Some(other)));
        assert!(!Affiliation::Shop(shop).matches(None));
        assert!(Affiliation::Unaffiliated.matches(None));
        assert!(!Affiliation::Unaffiliated.matches(Some(shop)));
    }

    #[test]
    fn test_affiliation_from_scope() {
        let shop = ShopId::new_random();
        assert_eq!(Affiliation::from(Scope::All), Affiliation::Any);
        assert_eq!(Affiliation::from(Scope::Shop(shop)), Affiliation::Shop(shop));
        assert_eq!(
            Affiliation::from(Scope::Unaffiliated),
            Affiliation::Unaffiliated
        );
    }
}
