//! Client (patient) domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use optica_core::{ClientId, ClientName, ShopId};

use super::Affiliation;

/// A patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client ID.
    pub id: ClientId,
    /// Display name.
    pub name: ClientName,
    /// Home shop; `None` for unaffiliated ("particular") clients.
    pub home_shop: Option<ShopId>,
    /// Brazilian taxpayer number.
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientInput {
    pub name: ClientName,
    pub home_shop: Option<ShopId>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl CreateClientInput {
    /// Input with only the required fields set.
    #[must_use]
    pub const fn new(name: ClientName, home_shop: Option<ShopId>) -> Self {
        Self {
            name,
            home_shop,
            cpf: None,
            birth_date: None,
            phone: None,
            email: None,
            whatsapp: None,
            address: None,
            notes: None,
        }
    }
}

/// Filter criteria for listing clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientQuery {
    /// Filter by client ID.
    pub id: Option<ClientId>,
    /// Filter on the home shop reference.
    pub home_shop: Affiliation,
}

impl ClientQuery {
    /// Clients whose home shop satisfies `affiliation`.
    #[must_use]
    pub const fn by_home_shop(affiliation: Affiliation) -> Self {
        Self {
            id: None,
            home_shop: affiliation,
        }
    }

    /// Evaluate the filter against a client.
    #[must_use]
    pub fn matches(&self, client: &Client) -> bool {
        self.id.is_none_or(|id| id == client.id) && self.home_shop.matches(client.home_shop)
    }
}

/// Sort order for client listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientOrder {
    /// By display name, ascending.
    #[default]
    Name,
}
