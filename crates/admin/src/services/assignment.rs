//! Receita-assignment picker service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use optica_core::Scope;

use crate::models::Prescription;
use crate::roster::{ClientView, RosterOutcome, RosterResolver};
use crate::store::EntityStore;

/// Parameters for building picker options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentRequest {
    /// The scope to pick clients from.
    pub scope: Scope,
    /// Keep the current selection instead of reloading options.
    pub preserve_selection: bool,
    /// The currently selected client, if any.
    pub selected: Option<ClientView>,
}

/// One selectable client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOption {
    #[serde(flatten)]
    pub client: ClientView,
    pub show_shop_marker: bool,
}

impl From<ClientView> for AssignmentOption {
    fn from(client: ClientView) -> Self {
        Self {
            show_shop_marker: client.show_shop_marker(),
            client,
        }
    }
}

/// What the picker should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssignmentOptions {
    /// Leave the picker as it is.
    Keep { selected: Option<ClientView> },
    /// Replace the picker contents.
    Refresh {
        outcome: RosterOutcome<AssignmentOption>,
    },
}

impl AssignmentOptions {
    /// Whether the options could not be loaded.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        match self {
            Self::Keep { .. } => false,
            Self::Refresh { outcome } => outcome.is_error(),
        }
    }
}

/// Service behind the receita-assignment picker.
pub struct AssignmentService<S: ?Sized> {
    resolver: RosterResolver<S>,
}

impl<S: EntityStore + ?Sized> AssignmentService<S> {
    #[must_use]
    pub const fn new(resolver: RosterResolver<S>) -> Self {
        Self { resolver }
    }

    /// Build the picker options for `request`.
    ///
    /// With `preserve_selection` set the store is not read at all.
    #[instrument(skip_all, fields(scope = %request.scope, preserve = request.preserve_selection))]
    pub async fn options(&self, request: AssignmentRequest) -> AssignmentOptions {
        if request.preserve_selection {
            return AssignmentOptions::Keep {
                selected: request.selected,
            };
        }

        let outcome = self.resolver.resolve(request.scope).await;
        AssignmentOptions::Refresh {
            outcome: outcome.map(AssignmentOption::from),
        }
    }

    /// The scope to pick a client from when editing `prescription`.
    #[must_use]
    pub fn scope_for_prescription(prescription: &Prescription) -> Scope {
        Scope::from(prescription.shop_id)
    }
}
