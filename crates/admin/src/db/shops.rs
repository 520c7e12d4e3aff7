//! Database operations for shops.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use optica_core::ShopId;

use super::RepositoryError;
use crate::models::{CreateShopInput, Shop, ShopOrder, ShopQuery};

const SHOP_COLUMNS: &str = "id, name, phone, email, address, responsible, notes, created_at";

/// Internal row type for shop queries.
#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    responsible: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Self {
            id: ShopId::new(row.id),
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            responsible: row.responsible,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &CreateShopInput) -> Result<Shop, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(&format!(
            r"
            INSERT INTO optica.shops (name, phone, email, address, responsible, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SHOP_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(&input.responsible)
        .bind(&input.notes)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(row.into())
    }

    /// Get a shop by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(&format!(
            "SELECT {SHOP_COLUMNS} FROM optica.shops WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List shops matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(
        &self,
        query: ShopQuery,
        order: ShopOrder,
    ) -> Result<Vec<Shop>, RepositoryError> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {SHOP_COLUMNS} FROM optica.shops WHERE TRUE"));

        if let Some(id) = query.id {
            builder.push(" AND id = ").push_bind(id);
        }

        match order {
            ShopOrder::Name => builder.push(" ORDER BY name ASC, id ASC"),
        };

        let rows = builder
            .build_query_as::<ShopRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a shop.
    ///
    /// Clients and prescriptions referencing the shop become unaffiliated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shop has this ID.
    pub async fn delete(&self, id: ShopId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM optica.shops WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
