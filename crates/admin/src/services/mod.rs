//! Business logic services for admin.
//!
//! # Services
//!
//! - `client_list` - Client list view (roster + search + decorations)
//! - `assignment` - Receita-assignment picker options
//! - `payments` - Prescriptions by shop scope and payer
//! - `dashboard` - Entity counts, payment totals, recent visits

pub mod assignment;
pub mod client_list;
pub mod dashboard;
pub mod payments;

use std::collections::HashMap;

use optica_core::ShopId;

use crate::models::{ShopOrder, ShopQuery};
use crate::store::{EntityStore, StoreError};

pub use assignment::{AssignmentOption, AssignmentOptions, AssignmentRequest, AssignmentService};
pub use client_list::{ClientListQuery, ClientListService, ClientListing};
pub use dashboard::{DashboardService, DashboardSummary, PaymentTotals, RecentVisit, VisitClient};
pub use payments::{PaymentListing, PaymentQuery, PaymentService};

/// Display name of every shop, by ID.
async fn shop_names<S: EntityStore + ?Sized>(
    store: &S,
) -> Result<HashMap<ShopId, String>, StoreError> {
    let shops = store
        .find_shops(ShopQuery::default(), ShopOrder::Name)
        .await?;
    Ok(shops.into_iter().map(|shop| (shop.id, shop.name)).collect())
}
