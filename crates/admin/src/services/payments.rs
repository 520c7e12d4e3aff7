//! Payments listing service.
//!
//! Prescriptions recorded under a shop scope, optionally narrowed to one
//! payer, newest first, with the client and shop names resolved.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use optica_core::{ClientId, ClientName, PrescriptionId, Scope, ShopId};

use crate::models::{Affiliation, Payer, PrescriptionOrder, PrescriptionQuery, ServiceType};
use crate::store::{EntityStore, StoreError};

/// Parameters for listing payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentQuery {
    /// Which shop the encounters happened at (`Unaffiliated` for
    /// encounters without a shop).
    pub scope: Scope,
    /// Only encounters with this payer.
    pub payer: Option<Payer>,
}

impl PaymentQuery {
    fn prescriptions(self) -> PrescriptionQuery {
        PrescriptionQuery {
            shop: Affiliation::from(self.scope),
            payer: self.payer,
            ..PrescriptionQuery::default()
        }
    }
}

/// One row of the payments listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentListing {
    pub prescription_id: PrescriptionId,
    pub prescribed_on: NaiveDate,
    pub client_id: ClientId,
    /// `None` when the client no longer exists.
    pub client_name: Option<ClientName>,
    pub shop_id: Option<ShopId>,
    pub shop_name: Option<String>,
    pub service_type: ServiceType,
    pub price: Decimal,
    pub payer: Payer,
}

/// Service behind the payments listing.
pub struct PaymentService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: EntityStore + ?Sized> PaymentService<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List the payments matching `query`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the prescription or shop reads fail.
    #[instrument(skip(self), fields(scope = %query.scope, payer = ?query.payer))]
    pub async fn list(&self, query: PaymentQuery) -> Result<Vec<PaymentListing>, StoreError> {
        let (records, shop_names) = tokio::try_join!(
            self.store
                .find_prescriptions(query.prescriptions(), PrescriptionOrder::DateDesc),
            super::shop_names(self.store.as_ref())
        )?;

        Ok(records
            .into_iter()
            .map(|record| {
                let prescription = record.prescription;
                PaymentListing {
                    prescription_id: prescription.id,
                    prescribed_on: prescription.prescribed_on,
                    client_id: prescription.client_id,
                    client_name: record.client.map(|client| client.name),
                    shop_id: prescription.shop_id,
                    shop_name: prescription
                        .shop_id
                        .and_then(|id| shop_names.get(&id).cloned()),
                    service_type: prescription.service_type,
                    price: prescription.price,
                    payer: prescription.payer,
                }
            })
            .collect())
    }
}
