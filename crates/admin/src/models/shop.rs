//! Shop domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use optica_core::ShopId;

/// An optical shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Unique shop ID.
    pub id: ShopId,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Person responsible for the shop.
    pub responsible: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the shop was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a shop.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateShopInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

/// Filter criteria for listing shops.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShopQuery {
    /// Filter by shop ID.
    pub id: Option<ShopId>,
}

/// Sort order for shop listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShopOrder {
    /// By display name, ascending.
    #[default]
    Name,
}
