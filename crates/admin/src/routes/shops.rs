//! Shop list handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::models::{Shop, ShopOrder, ShopQuery};
use crate::state::AppState;

/// All shops, ordered by name.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Shop>>, AppError> {
    let shops = state
        .store()
        .find_shops(ShopQuery::default(), ShopOrder::Name)
        .await?;
    Ok(Json(shops))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get, seeded};
    use crate::store::memory::Table;

    #[tokio::test]
    async fn test_index_lists_shops_by_name() {
        let seeded = seeded().await;
        let (status, body) = get(seeded.store, "/shops").await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|shop| shop["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Ótica Avenida", "Ótica Boa Vista"]);
    }

    #[tokio::test]
    async fn test_index_store_failure_is_unavailable() {
        let seeded = seeded().await;
        seeded.store.fail_reads(Table::Shops, true);

        let (status, _) = get(seeded.store, "/shops").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
