//! Client list handler.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use optica_core::Scope;

use super::roster_response;
use crate::error::AppError;
use crate::services::ClientListQuery;
use crate::state::AppState;

/// Client list query parameters.
#[derive(Debug, Deserialize)]
pub struct ClientListParams {
    /// Scope token.
    pub shop: Option<String>,
    /// Name search.
    pub q: Option<String>,
}

/// The client list view for a scope.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ClientListParams>,
) -> Result<Response, AppError> {
    let query = ClientListQuery {
        scope: Scope::from_filter(params.shop.as_deref()),
        search: params.q,
    };
    let outcome = state.client_list().list(&query).await?;
    Ok(roster_response(&outcome))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get, names, seeded};
    use crate::store::memory::Table;

    #[tokio::test]
    async fn test_index_for_shop() {
        let seeded = seeded().await;
        let uri = format!("/clients?shop={}", seeded.shop_a);

        let (status, body) = get(seeded.store, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(names(&body), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(body["roster"][2]["provenance"], "visitor");
        assert_eq!(body["roster"][2]["home_shop_name"], "Ótica Boa Vista");
        assert_eq!(body["roster"][2]["last_prescription"], "2026-02-10");
    }

    #[tokio::test]
    async fn test_index_particular_with_search() {
        let seeded = seeded().await;

        let (status, body) = get(seeded.store, "/clients?shop=particular&q=dav").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Dave"]);
        assert!(body["roster"][0]["home_shop_name"].is_null());
    }

    #[tokio::test]
    async fn test_index_roster_error_is_503() {
        let seeded = seeded().await;
        seeded.store.fail_reads(Table::Clients, true);

        let (status, body) = get(seeded.store, "/clients").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");
        assert_eq!(body["reason"], "store_unavailable");
    }
}
