//! Client roster resolution.
//!
//! A roster is the deduplicated, name-ordered list of clients relevant to a
//! [`Scope`](optica_core::Scope). For a shop scope it includes the shop's
//! own clients and its visitors (clients from elsewhere with prescription
//! history at the shop).
//!
//! - [`resolver`] - [`RosterResolver`], the single implementation both call sites use
//! - [`outcome`] - [`RosterOutcome`] and its error/warning values
//! - [`sequencer`] - stale-result protection for overlapping resolutions

pub mod outcome;
pub mod resolver;
pub mod sequencer;

use serde::{Deserialize, Serialize};

use optica_core::{ClientId, ClientName, Provenance, Scope, ShopId};

use crate::models::{Affiliation, Client};

pub use outcome::{RosterError, RosterOutcome, RosterWarning};
pub use resolver::RosterResolver;
pub use sequencer::{RequestSequencer, RequestToken, RosterFeed};

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientView {
    pub id: ClientId,
    pub name: ClientName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_shop: Option<ShopId>,
    pub provenance: Provenance,
}

impl ClientView {
    /// View of `client` with the given provenance.
    #[must_use]
    pub fn new(client: &Client, provenance: Provenance) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            home_shop: client.home_shop,
            provenance,
        }
    }

    /// View of `client` as seen from `scope`: native when its home shop
    /// satisfies the scope, a visitor otherwise.
    #[must_use]
    pub fn in_scope(client: &Client, scope: Scope) -> Self {
        let provenance = if Affiliation::from(scope).matches(client.home_shop) {
            Provenance::Native
        } else {
            Provenance::Visitor
        };
        Self::new(client, provenance)
    }

    /// Whether pickers should mark the entry with its home shop.
    ///
    /// Only visitors that belong to some other shop get a marker.
    #[must_use]
    pub const fn show_shop_marker(&self) -> bool {
        self.provenance.is_visitor() && self.home_shop.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn client(home_shop: Option<ShopId>) -> Client {
        Client {
            id: ClientId::new_random(),
            name: ClientName::parse("Carla").unwrap(),
            home_shop,
            cpf: None,
            birth_date: None,
            phone: None,
            email: None,
            whatsapp: None,
            address: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_show_shop_marker_only_for_affiliated_visitors() {
        let home = ShopId::new_random();

        let native = ClientView::new(&client(Some(home)), Provenance::Native);
        let visitor = ClientView::new(&client(Some(home)), Provenance::Visitor);
        let unaffiliated_visitor = ClientView::new(&client(None), Provenance::Visitor);

        assert!(!native.show_shop_marker());
        assert!(visitor.show_shop_marker());
        assert!(!unaffiliated_visitor.show_shop_marker());
    }

    #[test]
    fn test_in_scope_provenance() {
        let home = ShopId::new_random();
        let elsewhere = ShopId::new_random();
        let carla = client(Some(home));

        assert_eq!(
            ClientView::in_scope(&carla, Scope::Shop(home)).provenance,
            Provenance::Native
        );
        assert_eq!(
            ClientView::in_scope(&carla, Scope::Shop(elsewhere)).provenance,
            Provenance::Visitor
        );
        assert_eq!(
            ClientView::in_scope(&carla, Scope::All).provenance,
            Provenance::Native
        );
        assert_eq!(
            ClientView::in_scope(&carla, Scope::Unaffiliated).provenance,
            Provenance::Visitor
        );
    }

    #[test]
    fn test_client_view_json_shape() {
        let view = ClientView::new(&client(None), Provenance::Visitor);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["name"], "Carla");
        assert_eq!(json["provenance"], "visitor");
        assert!(json.get("home_shop").is_none());
    }
}
