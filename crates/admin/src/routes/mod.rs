//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (store ping)
//!
//! # Shops
//! GET  /shops                  - Shops ordered by name
//!
//! # Clients
//! GET  /clients?shop=&q=       - Client list view
//! GET  /roster?shop=           - Raw roster outcome
//!
//! # Prescriptions
//! GET  /prescriptions/assignment-options?shop=&preserve=&selected=
//! GET  /prescriptions/{id}/assignment-options?preserve=
//!
//! # Payments
//! GET  /payments?shop=&payer=  - Prescriptions by shop scope and payer
//!
//! # Dashboard
//! GET  /dashboard              - Counts, payment totals, recent visits
//! ```
//!
//! The `shop` parameter is a scope token: empty for every client,
//! `particular` for unaffiliated clients, or a shop ID.
//!
//! Roster-bearing responses are 200 for `ok` and `partial` outcomes and
//! 503 for `error`, with the outcome as the JSON body.

pub mod clients;
pub mod dashboard;
pub mod health;
pub mod payments;
pub mod prescriptions;
pub mod roster;
pub mod shops;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use crate::roster::RosterOutcome;
use crate::state::AppState;

/// Build the admin API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Shops
        .route("/shops", get(shops::index))
        // Clients
        .route("/clients", get(clients::index))
        .route("/roster", get(roster::show))
        // Prescriptions
        .route(
            "/prescriptions/assignment-options",
            get(prescriptions::assignment_options),
        )
        .route(
            "/prescriptions/{id}/assignment-options",
            get(prescriptions::assignment_options_for),
        )
        // Payments
        .route("/payments", get(payments::index))
        // Dashboard
        .route("/dashboard", get(dashboard::show))
}

/// Respond with a roster outcome, mapping `error` to 503.
pub(crate) fn roster_response<T: Serialize>(outcome: &RosterOutcome<T>) -> Response {
    let status = if outcome.is_error() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, Json(outcome)).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use optica_core::{ClientName, ShopId};

    use crate::models::{CreateClientInput, CreatePrescriptionInput, CreateShopInput};
    use crate::state::AppState;
    use crate::store::MemoryStore;

    /// Shop A with natives Alice and Bob, shop B with Carol (a visitor of A),
    /// and unaffiliated Dave.
    pub struct Seeded {
        pub store: Arc<MemoryStore>,
        pub shop_a: ShopId,
        pub shop_b: ShopId,
    }

    pub async fn seeded() -> Seeded {
        let store = Arc::new(MemoryStore::new());
        let shop_a = store
            .add_shop(CreateShopInput {
                name: "Ótica Avenida".to_string(),
                ..CreateShopInput::default()
            })
            .await
            .id;
        let shop_b = store
            .add_shop(CreateShopInput {
                name: "Ótica Boa Vista".to_string(),
                ..CreateShopInput::default()
            })
            .await
            .id;

        for (name, home) in [
            ("Alice", Some(shop_a)),
            ("Bob", Some(shop_a)),
            ("Dave", None),
        ] {
            store
                .add_client(CreateClientInput::new(ClientName::parse(name).unwrap(), home))
                .await;
        }
        let carol = store
            .add_client(CreateClientInput::new(
                ClientName::parse("Carol").unwrap(),
                Some(shop_b),
            ))
            .await;
        store
            .add_prescription(CreatePrescriptionInput::new(
                carol.id,
                Some(shop_a),
                chrono::NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            ))
            .await;

        Seeded {
            store,
            shop_a,
            shop_b,
        }
    }

    /// Issue a GET against the router, returning status and parsed JSON body
    /// (`Null` for non-JSON bodies).
    pub async fn get(store: Arc<MemoryStore>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = crate::app(AppState::new(store));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    /// Names of the entries in a roster-shaped JSON body.
    pub fn names(body: &serde_json::Value) -> Vec<String> {
        body["roster"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["name"].as_str().unwrap().to_string())
            .collect()
    }
}
