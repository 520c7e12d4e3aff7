//! Read-only entity store seam consumed by the roster resolver.
//!
//! Two adapters implement [`EntityStore`]:
//!
//! - [`PgEntityStore`] - backed by the `PostgreSQL` repositories in [`crate::db`]
//! - [`MemoryStore`] - in-process tables with fault injection, used by tests
//!   and the CLI demo

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::{
    Client, ClientOrder, ClientQuery, PrescriptionOrder, PrescriptionQuery, PrescriptionRecord,
    Shop, ShopOrder, ShopQuery,
};

pub use memory::MemoryStore;
pub use postgres::PgEntityStore;

/// A store read failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver reported an error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A repository rejected the read or decoded corrupt data.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Queryable source of shops, clients, and prescriptions.
///
/// Every method is a single read; implementations never cache between calls.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Shops matching `query`, in `order`.
    async fn find_shops(&self, query: ShopQuery, order: ShopOrder)
    -> Result<Vec<Shop>, StoreError>;

    /// Clients matching `query`, in `order`.
    async fn find_clients(
        &self,
        query: ClientQuery,
        order: ClientOrder,
    ) -> Result<Vec<Client>, StoreError>;

    /// Prescriptions matching `query`, in `order`, each joined to its client.
    ///
    /// A record's `client` is `None` when the referenced client is gone.
    async fn find_prescriptions(
        &self,
        query: PrescriptionQuery,
        order: PrescriptionOrder,
    ) -> Result<Vec<PrescriptionRecord>, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
