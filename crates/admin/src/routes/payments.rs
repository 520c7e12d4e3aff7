//! Payments listing handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use optica_core::Scope;

use crate::error::AppError;
use crate::models::Payer;
use crate::services::{PaymentListing, PaymentQuery};
use crate::state::AppState;

/// Payments listing query parameters.
#[derive(Debug, Deserialize)]
pub struct PaymentParams {
    /// Scope token for the shop the encounter happened at.
    pub shop: Option<String>,
    /// Payer name; blank for every payer.
    pub payer: Option<String>,
}

/// Prescriptions for a shop scope and payer, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PaymentParams>,
) -> Result<Json<Vec<PaymentListing>>, AppError> {
    let payer = params
        .payer
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::parse::<Payer>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let query = PaymentQuery {
        scope: Scope::from_filter(params.shop.as_deref()),
        payer,
    };
    Ok(Json(state.payments().list(query).await?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::models::{CreatePrescriptionInput, Payer};
    use crate::routes::test_support::{Seeded, get, seeded};
    use crate::store::memory::Table;

    /// The seeded data plus a paid encounter at shop B.
    async fn with_paid_visit() -> Seeded {
        let seeded = seeded().await;
        let (_, clients) = get(seeded.store.clone(), "/roster").await;
        let alice = clients["roster"][0]["id"].as_str().unwrap().parse().unwrap();

        let mut input = CreatePrescriptionInput::new(
            alice,
            Some(seeded.shop_b),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );
        input.price = Decimal::new(14_000, 2);
        input.payer = Payer::PagoOtica;
        seeded.store.add_prescription(input).await;
        seeded
    }

    #[tokio::test]
    async fn test_index_lists_every_payment_newest_first() {
        let seeded = with_paid_visit().await;

        let (status, body) = get(seeded.store, "/payments").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["prescribed_on"], "2026-03-01");
        assert_eq!(rows[0]["client_name"], "Alice");
        assert_eq!(rows[0]["shop_name"], "Ótica Boa Vista");
        assert_eq!(rows[0]["payer"], "pago_otica");
        assert_eq!(rows[0]["price"], "140.00");
        assert_eq!(rows[1]["client_name"], "Carol");
    }

    #[tokio::test]
    async fn test_index_filters_by_shop_and_payer() {
        let seeded = with_paid_visit().await;

        let uri = format!("/payments?shop={}&payer=pendente", seeded.shop_a);
        let (status, body) = get(seeded.store.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["client_name"], "Carol");

        let uri = format!("/payments?shop={}&payer=pago_otica", seeded.shop_a);
        let (_, body) = get(seeded.store.clone(), &uri).await;
        assert!(body.as_array().unwrap().is_empty());

        let (_, body) = get(seeded.store, "/payments?shop=particular&payer=").await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_index_unknown_payer_is_bad_request() {
        let seeded = seeded().await;

        let (status, _) = get(seeded.store, "/payments?payer=fiado").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_store_failure_is_unavailable() {
        let seeded = seeded().await;
        seeded.store.fail_reads(Table::Prescriptions, true);

        let (status, _) = get(seeded.store, "/payments").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
