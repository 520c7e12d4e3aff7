//! Raw roster handler.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use optica_core::Scope;

use super::roster_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RosterParams {
    pub shop: Option<String>,
}

/// The roster outcome for a scope.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Query(params): Query<RosterParams>) -> Response {
    let scope = Scope::from_filter(params.shop.as_deref());
    roster_response(&state.resolver().resolve(scope).await)
}
