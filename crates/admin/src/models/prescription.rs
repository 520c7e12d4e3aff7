//! Prescription ("receita") domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use optica_core::{ClientId, PrescriptionId, ShopId};

use super::{Affiliation, Client};

/// Kind of service performed at the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "optica.service_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    ExameVista,
    ConsultaOculos,
    AjusteReceita,
    Retorno,
}

/// Who pays for the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "optica.payer", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    PagoOtica,
    PagoCliente,
    #[default]
    Pendente,
}

impl Payer {
    /// Wire name, as used in query strings and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PagoOtica => "pago_otica",
            Self::PagoCliente => "pago_cliente",
            Self::Pendente => "pendente",
        }
    }

    /// Whether the encounter has been paid by anyone.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Pendente)
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized payer name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payer: {0}")]
pub struct PayerParseError(String);

impl FromStr for Payer {
    type Err = PayerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pago_otica" => Ok(Self::PagoOtica),
            "pago_cliente" => Ok(Self::PagoCliente),
            "pendente" => Ok(Self::Pendente),
            other => Err(PayerParseError(other.to_string())),
        }
    }
}

/// Measurements for one eye, kept verbatim as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EyeMeasurements {
    pub spherical: Option<String>,
    pub cylindrical: Option<String>,
    pub axis: Option<String>,
    pub dnp: Option<String>,
    pub addition: Option<String>,
}

/// A dated prescription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    /// Unique prescription ID.
    pub id: PrescriptionId,
    /// The patient.
    pub client_id: ClientId,
    /// Shop where the encounter happened; `None` for unaffiliated encounters.
    pub shop_id: Option<ShopId>,
    /// Encounter date.
    pub prescribed_on: NaiveDate,
    pub service_type: ServiceType,
    pub price: Decimal,
    pub payer: Payer,
    pub notes: Option<String>,
    /// Right eye (oculus dexter).
    pub od: EyeMeasurements,
    /// Left eye (oculus sinister).
    pub oe: EyeMeasurements,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// A prescription joined with its client.
///
/// `client` is `None` when the referenced client no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionRecord {
    pub prescription: Prescription,
    pub client: Option<Client>,
}

/// Input for creating a prescription.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrescriptionInput {
    pub client_id: ClientId,
    pub shop_id: Option<ShopId>,
    pub prescribed_on: NaiveDate,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub payer: Payer,
    pub notes: Option<String>,
    #[serde(default)]
    pub od: EyeMeasurements,
    #[serde(default)]
    pub oe: EyeMeasurements,
}

impl CreatePrescriptionInput {
    /// Input with only the required fields set.
    #[must_use]
    pub fn new(client_id: ClientId, shop_id: Option<ShopId>, prescribed_on: NaiveDate) -> Self {
        Self {
            client_id,
            shop_id,
            prescribed_on,
            service_type: ServiceType::default(),
            price: Decimal::ZERO,
            payer: Payer::default(),
            notes: None,
            od: EyeMeasurements::default(),
            oe: EyeMeasurements::default(),
        }
    }
}

/// Filter criteria for listing prescriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrescriptionQuery {
    /// Filter by prescription ID.
    pub id: Option<PrescriptionId>,
    /// Filter by client.
    pub client: Option<ClientId>,
    /// Filter on the shop reference.
    pub shop: Affiliation,
    /// Filter by payer.
    pub payer: Option<Payer>,
}

impl PrescriptionQuery {
    /// Prescriptions recorded at the given shop.
    #[must_use]
    pub const fn at_shop(shop: ShopId) -> Self {
        Self {
            id: None,
            client: None,
            shop: Affiliation::Shop(shop),
            payer: None,
        }
    }

    /// A single prescription by ID.
    #[must_use]
    pub const fn by_id(id: PrescriptionId) -> Self {
        Self {
            id: Some(id),
            client: None,
            shop: Affiliation::Any,
            payer: None,
        }
    }

    /// Evaluate the filter against a prescription.
    #[must_use]
    pub fn matches(&self, prescription: &Prescription) -> bool {
        self.id.is_none_or(|id| id == prescription.id)
            && self.client.is_none_or(|id| id == prescription.client_id)
            && self.shop.matches(prescription.shop_id)
            && self.payer.is_none_or(|payer| payer == prescription.payer)
    }
}

/// Sort order for prescription listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrescriptionOrder {
    /// Most recent first.
    #[default]
    DateDesc,
    /// Oldest first.
    DateAsc,
}
