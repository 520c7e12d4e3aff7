//! Receita-assignment picker handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use optica_core::{ClientId, PrescriptionId, Scope};

use crate::error::AppError;
use crate::models::{ClientOrder, ClientQuery, PrescriptionOrder, PrescriptionQuery};
use crate::roster::ClientView;
use crate::services::{AssignmentOptions, AssignmentRequest, AssignmentService};
use crate::state::AppState;
use crate::store::EntityStore;

/// Picker query parameters.
#[derive(Debug, Deserialize)]
pub struct AssignmentParams {
    /// Scope token.
    pub shop: Option<String>,
    /// Keep the current selection.
    #[serde(default)]
    pub preserve: bool,
    /// Currently selected client.
    pub selected: Option<ClientId>,
}

/// Picker query parameters for an existing prescription.
#[derive(Debug, Deserialize)]
pub struct ExistingAssignmentParams {
    #[serde(default)]
    pub preserve: bool,
}

/// Picker options for a scope.
///
/// The selected client is only looked up when the selection is preserved.
#[instrument(skip(state))]
pub async fn assignment_options(
    State(state): State<AppState>,
    Query(params): Query<AssignmentParams>,
) -> Result<Response, AppError> {
    let scope = Scope::from_filter(params.shop.as_deref());

    let selected = match params.selected {
        Some(id) if params.preserve => Some(selected_view(&state, id, scope).await?),
        _ => None,
    };

    let options = state
        .assignment()
        .options(AssignmentRequest {
            scope,
            preserve_selection: params.preserve,
            selected,
        })
        .await;
    Ok(options_response(&options))
}

/// Picker options for reassigning an existing prescription.
///
/// The scope follows the prescription's shop and the current selection is
/// the prescription's client.
#[instrument(skip(state))]
pub async fn assignment_options_for(
    State(state): State<AppState>,
    Path(id): Path<PrescriptionId>,
    Query(params): Query<ExistingAssignmentParams>,
) -> Result<Response, AppError> {
    let record = state
        .store()
        .find_prescriptions(PrescriptionQuery::by_id(id), PrescriptionOrder::default())
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("prescription {id}")))?;

    let scope = AssignmentService::<dyn EntityStore>::scope_for_prescription(&record.prescription);
    let selected = record
        .client
        .as_ref()
        .map(|client| ClientView::in_scope(client, scope));

    let options = state
        .assignment()
        .options(AssignmentRequest {
            scope,
            preserve_selection: params.preserve,
            selected,
        })
        .await;
    Ok(options_response(&options))
}

async fn selected_view(
    state: &AppState,
    id: ClientId,
    scope: Scope,
) -> Result<ClientView, AppError> {
    let client = state
        .store()
        .find_clients(
            ClientQuery {
                id: Some(id),
                ..ClientQuery::default()
            },
            ClientOrder::Name,
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::BadRequest(format!("unknown client {id}")))?;
    Ok(ClientView::in_scope(&client, scope))
}

fn options_response(options: &AssignmentOptions) -> Response {
    let status = if options.is_error() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, Json(options)).into_response()
}
