//! Database operations for prescriptions.
//!
//! Reads join each prescription to its client with a `LEFT JOIN`, so a
//! prescription whose client row is gone still comes back, with no client.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use optica_core::{ClientId, ClientName, PrescriptionId, ShopId};

use super::RepositoryError;
use super::clients::push_affiliation;
use crate::models::{
    Client, CreatePrescriptionInput, EyeMeasurements, Payer, Prescription, PrescriptionOrder,
    PrescriptionQuery, PrescriptionRecord, ServiceType,
};

const PRESCRIPTION_COLUMNS: &str = r"
    p.id, p.client_id, p.shop_id, p.prescribed_on, p.service_type, p.price, p.payer, p.notes,
    p.od_spherical, p.od_cylindrical, p.od_axis, p.od_dnp, p.od_addition,
    p.oe_spherical, p.oe_cylindrical, p.oe_axis, p.oe_dnp, p.oe_addition,
    p.created_at,
    c.id AS c_id, c.name AS c_name, c.shop_id AS c_shop_id, c.cpf AS c_cpf,
    c.birth_date AS c_birth_date, c.phone AS c_phone, c.email AS c_email,
    c.whatsapp AS c_whatsapp, c.address AS c_address, c.notes AS c_notes,
    c.created_at AS c_created_at
";

/// Internal row type for prescription queries joined with their client.
#[derive(Debug, sqlx::FromRow)]
struct PrescriptionRow {
    id: Uuid,
    client_id: Uuid,
    shop_id: Option<Uuid>,
    prescribed_on: NaiveDate,
    service_type: ServiceType,
    price: Decimal,
    payer: Payer,
    notes: Option<String>,
    od_spherical: Option<String>,
    od_cylindrical: Option<String>,
    od_axis: Option<String>,
    od_dnp: Option<String>,
    od_addition: Option<String>,
    oe_spherical: Option<String>,
    oe_cylindrical: Option<String>,
    oe_axis: Option<String>,
    oe_dnp: Option<String>,
    oe_addition: Option<String>,
    created_at: DateTime<Utc>,
    c_id: Option<Uuid>,
    c_name: Option<String>,
    c_shop_id: Option<Uuid>,
    c_cpf: Option<String>,
    c_birth_date: Option<NaiveDate>,
    c_phone: Option<String>,
    c_email: Option<String>,
    c_whatsapp: Option<String>,
    c_address: Option<String>,
    c_notes: Option<String>,
    c_created_at: Option<DateTime<Utc>>,
}

impl TryFrom<PrescriptionRow> for PrescriptionRecord {
    type Error = RepositoryError;

    fn try_from(row: PrescriptionRow) -> Result<Self, Self::Error> {
        let client = match (row.c_id, row.c_name, row.c_created_at) {
            (Some(id), Some(name), Some(created_at)) => {
                let name = ClientName::parse(&name).map_err(|e| {
                    RepositoryError::DataCorruption(format!("client {id} has invalid name: {e}"))
                })?;
                Some(Client {
                    id: ClientId::new(id),
                    name,
                    home_shop: row.c_shop_id.map(ShopId::new),
                    cpf: row.c_cpf,
                    birth_date: row.c_birth_date,
                    phone: row.c_phone,
                    email: row.c_email,
                    whatsapp: row.c_whatsapp,
                    address: row.c_address,
                    notes: row.c_notes,
                    created_at,
                })
            }
            _ => None,
        };

        Ok(Self {
            prescription: Prescription {
                id: PrescriptionId::new(row.id),
                client_id: ClientId::new(row.client_id),
                shop_id: row.shop_id.map(ShopId::new),
                prescribed_on: row.prescribed_on,
                service_type: row.service_type,
                price: row.price,
                payer: row.payer,
                notes: row.notes,
                od: EyeMeasurements {
                    spherical: row.od_spherical,
                    cylindrical: row.od_cylindrical,
                    axis: row.od_axis,
                    dnp: row.od_dnp,
                    addition: row.od_addition,
                },
                oe: EyeMeasurements {
                    spherical: row.oe_spherical,
                    cylindrical: row.oe_cylindrical,
                    axis: row.oe_axis,
                    dnp: row.oe_dnp,
                    addition: row.oe_addition,
                },
                created_at: row.created_at,
            },
            client,
        })
    }
}

/// Repository for prescription database operations.
pub struct PrescriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PrescriptionRepository<'a> {
    /// Create a new prescription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new prescription.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the client or shop does not exist.
    pub async fn create(
        &self,
        input: &CreatePrescriptionInput,
    ) -> Result<PrescriptionId, RepositoryError> {
        let id: Uuid = sqlx::query_scalar(
            r"
            INSERT INTO optica.prescriptions (
                client_id, shop_id, prescribed_on, service_type, price, payer, notes,
                od_spherical, od_cylindrical, od_axis, od_dnp, od_addition,
                oe_spherical, oe_cylindrical, oe_axis, oe_dnp, oe_addition
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            ",
        )
        .bind(input.client_id)
        .bind(input.shop_id)
        .bind(input.prescribed_on)
        .bind(input.service_type)
        .bind(input.price)
        .bind(input.payer)
        .bind(&input.notes)
        .bind(&input.od.spherical)
        .bind(&input.od.cylindrical)
        .bind(&input.od.axis)
        .bind(&input.od.dnp)
        .bind(&input.od.addition)
        .bind(&input.oe.spherical)
        .bind(&input.oe.cylindrical)
        .bind(&input.oe.axis)
        .bind(&input.oe.dnp)
        .bind(&input.oe.addition)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(PrescriptionId::new(id))
    }

    /// Get a prescription (with its client) by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: PrescriptionId,
    ) -> Result<Option<PrescriptionRecord>, RepositoryError> {
        let mut records = self
            .find(PrescriptionQuery::by_id(id), PrescriptionOrder::default())
            .await?;
        Ok(records.pop())
    }

    /// List prescriptions matching the filter, each joined to its client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(
        &self,
        query: PrescriptionQuery,
        order: PrescriptionOrder,
    ) -> Result<Vec<PrescriptionRecord>, RepositoryError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            r"
            SELECT {PRESCRIPTION_COLUMNS}
            FROM optica.prescriptions p
            LEFT JOIN optica.clients c ON c.id = p.client_id
            WHERE TRUE
            "
        ));

        if let Some(id) = query.id {
            builder.push(" AND p.id = ").push_bind(id);
        }
        if let Some(client) = query.client {
            builder.push(" AND p.client_id = ").push_bind(client);
        }
        push_affiliation(&mut builder, "p.shop_id", query.shop);
        if let Some(payer) = query.payer {
            builder.push(" AND p.payer = ").push_bind(payer);
        }

        match order {
            PrescriptionOrder::DateDesc => {
                builder.push(" ORDER BY p.prescribed_on DESC, p.created_at DESC, p.id DESC")
            }
            PrescriptionOrder::DateAsc => {
                builder.push(" ORDER BY p.prescribed_on ASC, p.created_at ASC, p.id ASC")
            }
        };

        let rows = builder
            .build_query_as::<PrescriptionRow>()
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Delete a prescription.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no prescription has this ID.
    pub async fn delete(&self, id: PrescriptionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM optica.prescriptions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
