//! Dashboard summary service.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use optica_core::{ClientId, ClientName, PrescriptionId};

use crate::models::{
    ClientOrder, ClientQuery, Payer, PrescriptionOrder, PrescriptionQuery, PrescriptionRecord,
    ShopOrder, ShopQuery,
};
use crate::store::{EntityStore, StoreError};

/// How many recent visits the summary carries.
pub const RECENT_VISITS: usize = 5;

/// Sums of prescription prices by who paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotals {
    /// Everything not pending.
    pub paid: Decimal,
    pub paid_by_shop: Decimal,
    pub paid_by_client: Decimal,
}

impl PaymentTotals {
    fn record(&mut self, payer: Payer, price: Decimal) {
        if payer.is_paid() {
            self.paid += price;
        }
        match payer {
            Payer::PagoOtica => self.paid_by_shop += price,
            Payer::PagoCliente => self.paid_by_client += price,
            Payer::Pendente => {}
        }
    }
}

/// The client of a recent visit, as it stands now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisitClient {
    /// A client with a home shop.
    Affiliated { id: ClientId, name: ClientName },
    /// A client without a home shop.
    Particular { id: ClientId, name: ClientName },
    /// The client record no longer exists.
    Removed { id: ClientId },
}

impl VisitClient {
    fn from_record(record: &PrescriptionRecord) -> Self {
        match &record.client {
            Some(client) if client.home_shop.is_some() => Self::Affiliated {
                id: client.id,
                name: client.name.clone(),
            },
            Some(client) => Self::Particular {
                id: client.id,
                name: client.name.clone(),
            },
            None => Self::Removed {
                id: record.prescription.client_id,
            },
        }
    }
}

impl fmt::Display for VisitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affiliated { name, .. } => write!(f, "{name}"),
            Self::Particular { name, .. } => write!(f, "{name} (Particular)"),
            Self::Removed { .. } => f.write_str("Cliente Removido"),
        }
    }
}

/// One entry of the recent activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentVisit {
    pub prescription_id: PrescriptionId,
    pub prescribed_on: NaiveDate,
    pub client: VisitClient,
}

/// Counts, totals, and recent activity across the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub shops: usize,
    pub clients: usize,
    pub prescriptions: usize,
    pub totals: PaymentTotals,
    /// Newest first, at most [`RECENT_VISITS`].
    pub recent: Vec<RecentVisit>,
}

/// Service behind the dashboard.
pub struct DashboardService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: EntityStore + ?Sized> DashboardService<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Summarize the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any of the three reads fails.
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<DashboardSummary, StoreError> {
        let (shops, clients, records) = tokio::try_join!(
            self.store.find_shops(ShopQuery::default(), ShopOrder::Name),
            self.store
                .find_clients(ClientQuery::default(), ClientOrder::Name),
            self.store
                .find_prescriptions(PrescriptionQuery::default(), PrescriptionOrder::DateDesc),
        )?;

        let mut totals = PaymentTotals::default();
        for record in &records {
            totals.record(record.prescription.payer, record.prescription.price);
        }

        let recent = records
            .iter()
            .take(RECENT_VISITS)
            .map(|record| RecentVisit {
                prescription_id: record.prescription.id,
                prescribed_on: record.prescription.prescribed_on,
                client: VisitClient::from_record(record),
            })
            .collect();

        Ok(DashboardSummary {
            shops: shops.len(),
            clients: clients.len(),
            prescriptions: records.len(),
            totals,
            recent,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::models::CreatePrescriptionInput;
    use crate::store::MemoryStore;
    use crate::store::memory::Table;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_summary_of_demo_data() {
        let store = MemoryStore::new();
        demo::load_memory(&store).await.unwrap();
        let service = DashboardService::new(Arc::new(store));

        let summary = service.summary().await.unwrap();

        assert_eq!(
            (summary.shops, summary.clients, summary.prescriptions),
            (2, 4, 4)
        );
        assert_eq!(
            summary.totals,
            PaymentTotals {
                paid: Decimal::new(360, 0),
                paid_by_shop: Decimal::new(90, 0),
                paid_by_client: Decimal::new(270, 0),
            }
        );

        let labels: Vec<(NaiveDate, String)> = summary
            .recent
            .iter()
            .map(|visit| (visit.prescribed_on, visit.client.to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (day(3, 3), "Carol".to_string()),
                (day(2, 21), "Dave (Particular)".to_string()),
                (day(2, 10), "Carol".to_string()),
                (day(1, 12), "Alice".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_recent_is_capped_and_marks_removed_clients() {
        let store = MemoryStore::new();
        let ids = demo::load_memory(&store).await.unwrap();
        for d in 1..=3 {
            store
                .add_prescription(CreatePrescriptionInput::new(
                    ids.clients[1],
                    Some(ids.shops[0]),
                    day(5, d),
                ))
                .await;
        }
        store.remove_client(ids.clients[1]).await.unwrap();
        let service = DashboardService::new(Arc::new(store));

        let summary = service.summary().await.unwrap();

        assert_eq!(summary.clients, 3);
        assert_eq!(summary.prescriptions, 7);
        assert_eq!(summary.recent.len(), RECENT_VISITS);
        assert_eq!(
            summary.recent[0].client,
            VisitClient::Removed {
                id: ids.clients[1]
            }
        );
        assert_eq!(summary.recent[0].client.to_string(), "Cliente Removido");
        assert_eq!(summary.recent[4].prescribed_on, day(2, 21));
    }

    #[tokio::test]
    async fn test_pending_counts_toward_no_total() {
        let store = MemoryStore::new();
        let ids = demo::load_memory(&store).await.unwrap();
        let mut pending = CreatePrescriptionInput::new(ids.clients[0], None, day(6, 1));
        pending.price = Decimal::new(500, 0);
        store.add_prescription(pending).await;
        let service = DashboardService::new(Arc::new(store));

        let summary = service.summary().await.unwrap();

        assert_eq!(summary.totals.paid, Decimal::new(360, 0));
    }

    #[tokio::test]
    async fn test_read_failure_is_error() {
        let store = MemoryStore::new();
        store.fail_reads(Table::Clients, true);
        let service = DashboardService::new(Arc::new(store));

        assert!(matches!(
            service.summary().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
