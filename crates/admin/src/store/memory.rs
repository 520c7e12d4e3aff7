//! In-process [`EntityStore`] for tests and demos.
//!
//! Unlike the `PostgreSQL` schema, nothing here enforces foreign keys:
//! [`MemoryStore::remove_client`] leaves the client's prescriptions behind,
//! which is how dangling references are reproduced.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use optica_core::{ClientId, PrescriptionId, ShopId, compare_names};

use super::{EntityStore, StoreError};
use crate::models::{
    Client, ClientOrder, ClientQuery, CreateClientInput, CreatePrescriptionInput,
    CreateShopInput, Prescription, PrescriptionOrder, PrescriptionQuery, PrescriptionRecord,
    Shop, ShopOrder, ShopQuery,
};

/// A table of the in-memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Shops,
    Clients,
    Prescriptions,
}

impl Table {
    const ALL: [Self; 3] = [Self::Shops, Self::Clients, Self::Prescriptions];

    const fn name(self) -> &'static str {
        match self {
            Self::Shops => "shops",
            Self::Clients => "clients",
            Self::Prescriptions => "prescriptions",
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    shops: Vec<Shop>,
    clients: Vec<Client>,
    prescriptions: Vec<Prescription>,
}

/// Per-table switches and counters.
#[derive(Debug, Default)]
struct Probe {
    failing: AtomicBool,
    fail_next: AtomicUsize,
    reads: AtomicUsize,
    latency: Option<Duration>,
}

/// Entity store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    shops: Probe,
    clients: Probe,
    prescriptions: Probe,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every read of `table` by `latency`.
    #[must_use]
    pub fn with_latency(mut self, table: Table, latency: Duration) -> Self {
        self.probe_mut(table).latency = Some(latency);
        self
    }

    /// Make reads of `table` fail (or succeed again).
    pub fn fail_reads(&self, table: Table, failing: bool) {
        self.probe(table).failing.store(failing, Ordering::SeqCst);
    }

    /// Make only the next `count` reads of `table` fail.
    pub fn fail_next_reads(&self, table: Table, count: usize) {
        self.probe(table).fail_next.store(count, Ordering::SeqCst);
    }

    /// Make every read and `ping` fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of reads issued against `table` so far, failed ones included.
    #[must_use]
    pub fn read_count(&self, table: Table) -> usize {
        self.probe(table).reads.load(Ordering::SeqCst)
    }

    /// Total reads across all tables.
    #[must_use]
    pub fn total_reads(&self) -> usize {
        Table::ALL.iter().map(|t| self.read_count(*t)).sum()
    }

    /// Insert a shop.
    pub async fn add_shop(&self, input: CreateShopInput) -> Shop {
        let shop = Shop {
            id: ShopId::new_random(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            responsible: input.responsible,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.tables.write().await.shops.push(shop.clone());
        shop
    }

    /// Insert a client. The home shop is not checked.
    pub async fn add_client(&self, input: CreateClientInput) -> Client {
        let client = Client {
            id: ClientId::new_random(),
            name: input.name,
            home_shop: input.home_shop,
            cpf: input.cpf,
            birth_date: input.birth_date,
            phone: input.phone,
            email: input.email,
            whatsapp: input.whatsapp,
            address: input.address,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.tables.write().await.clients.push(client.clone());
        client
    }

    /// Insert a prescription. Neither the client nor the shop is checked.
    pub async fn add_prescription(&self, input: CreatePrescriptionInput) -> Prescription {
        let prescription = Prescription {
            id: PrescriptionId::new_random(),
            client_id: input.client_id,
            shop_id: input.shop_id,
            prescribed_on: input.prescribed_on,
            service_type: input.service_type,
            price: input.price,
            payer: input.payer,
            notes: input.notes,
            od: input.od,
            oe: input.oe,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .prescriptions
            .push(prescription.clone());
        prescription
    }

    /// Remove a client, leaving its prescriptions in place.
    pub async fn remove_client(&self, id: ClientId) -> Option<Client> {
        let mut tables = self.tables.write().await;
        let position = tables.clients.iter().position(|c| c.id == id)?;
        Some(tables.clients.remove(position))
    }

    const fn probe(&self, table: Table) -> &Probe {
        match table {
            Table::Shops => &self.shops,
            Table::Clients => &self.clients,
            Table::Prescriptions => &self.prescriptions,
        }
    }

    const fn probe_mut(&mut self, table: Table) -> &mut Probe {
        match table {
            Table::Shops => &mut self.shops,
            Table::Clients => &mut self.clients,
            Table::Prescriptions => &mut self.prescriptions,
        }
    }

    /// Count the read, apply latency, then fail if a fault is armed.
    async fn begin_read(&self, table: Table) -> Result<(), StoreError> {
        let probe = self.probe(table);
        probe.reads.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = probe.latency {
            tokio::time::sleep(latency).await;
        }

        let one_shot = probe
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if one_shot || self.offline.load(Ordering::SeqCst) || probe.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "{} table is unavailable",
                table.name()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_shops(
        &self,
        query: ShopQuery,
        order: ShopOrder,
    ) -> Result<Vec<Shop>, StoreError> {
        self.begin_read(Table::Shops).await?;

        let tables = self.tables.read().await;
        let mut shops: Vec<Shop> = tables
            .shops
            .iter()
            .filter(|shop| query.id.is_none_or(|id| id == shop.id))
            .cloned()
            .collect();

        match order {
            ShopOrder::Name => {
                shops.sort_by(|a, b| compare_names(&a.name, &b.name).then(a.id.cmp(&b.id)));
            }
        }
        Ok(shops)
    }

    async fn find_clients(
        &self,
        query: ClientQuery,
        order: ClientOrder,
    ) -> Result<Vec<Client>, StoreError> {
        self.begin_read(Table::Clients).await?;

        let tables = self.tables.read().await;
        let mut clients: Vec<Client> = tables
            .clients
            .iter()
            .filter(|client| query.matches(client))
            .cloned()
            .collect();

        match order {
            ClientOrder::Name => {
                clients.sort_by(|a, b| compare_names(a.name.as_str(), b.name.as_str()));
            }
        }
        Ok(clients)
    }

    async fn find_prescriptions(
        &self,
        query: PrescriptionQuery,
        order: PrescriptionOrder,
    ) -> Result<Vec<PrescriptionRecord>, StoreError> {
        self.begin_read(Table::Prescriptions).await?;

        let tables = self.tables.read().await;
        let mut prescriptions: Vec<&Prescription> = tables
            .prescriptions
            .iter()
            .filter(|p| query.matches(p))
            .collect();

        match order {
            PrescriptionOrder::DateDesc => prescriptions.sort_by(|a, b| {
                b.prescribed_on
                    .cmp(&a.prescribed_on)
                    .then(b.created_at.cmp(&a.created_at))
            }),
            PrescriptionOrder::DateAsc => prescriptions.sort_by(|a, b| {
                a.prescribed_on
                    .cmp(&b.prescribed_on)
                    .then(a.created_at.cmp(&b.created_at))
            }),
        }

        Ok(prescriptions
            .into_iter()
            .map(|p| PrescriptionRecord {
                prescription: p.clone(),
                client: tables.clients.iter().find(|c| c.id == p.client_id).cloned(),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}
