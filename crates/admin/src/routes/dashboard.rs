//! Dashboard handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::services::DashboardSummary;
use crate::state::AppState;

/// Counts, payment totals, and recent visits.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(state.dashboard().summary().await?))
}
