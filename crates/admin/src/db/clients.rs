//! Database operations for clients.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use optica_core::{ClientId, ClientName, ShopId};

use super::RepositoryError;
use crate::models::{Affiliation, Client, ClientOrder, ClientQuery, CreateClientInput};

pub(crate) const CLIENT_COLUMNS: &str = "id, name, shop_id, cpf, birth_date, phone, email, whatsapp, address, notes, created_at";

/// Internal row type for client queries.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    shop_id: Option<Uuid>,
    cpf: Option<String>,
    birth_date: Option<NaiveDate>,
    phone: Option<String>,
    email: Option<String>,
    whatsapp: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = RepositoryError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let name = ClientName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("client {} has invalid name: {e}", row.id))
        })?;

        Ok(Self {
            id: ClientId::new(row.id),
            name,
            home_shop: row.shop_id.map(ShopId::new),
            cpf: row.cpf,
            birth_date: row.birth_date,
            phone: row.phone,
            email: row.email,
            whatsapp: row.whatsapp,
            address: row.address,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

/// Append an affiliation predicate on `column` to a query under construction.
pub(crate) fn push_affiliation(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: &str,
    affiliation: Affiliation,
) {
    match affiliation {
        Affiliation::Any => {}
        Affiliation::Shop(id) => {
            builder.push(format!(" AND {column} = ")).push_bind(id);
        }
        Affiliation::Unaffiliated => {
            builder.push(format!(" AND {column} IS NULL"));
        }
    }
}

/// `ORDER BY` clause for a client order.
///
/// Equal names fall back to creation order, so repeated reads agree.
const fn order_by(order: ClientOrder) -> &'static str {
    match order {
        ClientOrder::Name => " ORDER BY name ASC, created_at ASC, id ASC",
    }
}

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the home shop does not exist.
    pub async fn create(&self, input: &CreateClientInput) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r"
            INSERT INTO optica.clients (
                name, shop_id, cpf, birth_date, phone, email, whatsapp, address, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {CLIENT_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(input.home_shop)
        .bind(&input.cpf)
        .bind(input.birth_date)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.whatsapp)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    /// Get a client by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM optica.clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List clients matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored name is blank.
    pub async fn find(
        &self,
        query: ClientQuery,
        order: ClientOrder,
    ) -> Result<Vec<Client>, RepositoryError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {CLIENT_COLUMNS} FROM optica.clients WHERE TRUE"
        ));

        if let Some(id) = query.id {
            builder.push(" AND id = ").push_bind(id);
        }
        push_affiliation(&mut builder, "shop_id", query.home_shop);

        builder.push(order_by(order));

        let rows = builder
            .build_query_as::<ClientRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Delete a client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no client has this ID.
    pub async fn delete(&self, id: ClientId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM optica.clients WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
