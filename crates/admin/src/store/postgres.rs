//! `PostgreSQL` adapter for [`EntityStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{EntityStore, StoreError};
use crate::db::{ClientRepository, PrescriptionRepository, ShopRepository};
use crate::models::{
    Client, ClientOrder, ClientQuery, PrescriptionOrder, PrescriptionQuery, PrescriptionRecord,
    Shop, ShopOrder, ShopQuery,
};

/// Entity store over a `PostgreSQL` connection pool.
#[derive(Debug, Clone)]
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    /// Create a store that reads through `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for writes through the repositories.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn find_shops(
        &self,
        query: ShopQuery,
        order: ShopOrder,
    ) -> Result<Vec<Shop>, StoreError> {
        Ok(ShopRepository::new(&self.pool).find(query, order).await?)
    }

    async fn find_clients(
        &self,
        query: ClientQuery,
        order: ClientOrder,
    ) -> Result<Vec<Client>, StoreError> {
        Ok(ClientRepository::new(&self.pool).find(query, order).await?)
    }

    async fn find_prescriptions(
        &self,
        query: PrescriptionQuery,
        order: PrescriptionOrder,
    ) -> Result<Vec<PrescriptionRecord>, StoreError> {
        Ok(PrescriptionRepository::new(&self.pool)
            .find(query, order)
            .await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
