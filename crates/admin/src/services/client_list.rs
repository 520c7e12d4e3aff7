//! Client list view service.
//!
//! Resolves the roster for a scope, filters it by a search term, and
//! decorates each entry with its home shop name and most recent
//! prescription date.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use optica_core::{ClientId, Scope};

use crate::models::{PrescriptionOrder, PrescriptionQuery};
use crate::roster::{ClientView, RosterOutcome, RosterResolver};
use crate::store::{EntityStore, StoreError};

/// Parameters for listing clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientListQuery {
    /// Which clients to list.
    pub scope: Scope,
    /// Case-insensitive substring filter on the display name.
    pub search: Option<String>,
}

/// One row of the client list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientListing {
    #[serde(flatten)]
    pub client: ClientView,
    /// Display name of the client's home shop.
    pub home_shop_name: Option<String>,
    /// Date of the client's most recent prescription.
    pub last_prescription: Option<NaiveDate>,
}

/// Service behind the client list view.
pub struct ClientListService<S: ?Sized> {
    store: Arc<S>,
    resolver: RosterResolver<S>,
}

impl<S: EntityStore + ?Sized> ClientListService<S> {
    /// Create a new client list service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            resolver: RosterResolver::new(Arc::clone(&store)),
            store,
        }
    }

    /// List the clients for `query`.
    ///
    /// The roster's own status (ok, partial, error) is passed through.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the shop or prescription lookups fail.
    #[instrument(skip(self), fields(scope = %query.scope))]
    pub async fn list(
        &self,
        query: &ClientListQuery,
    ) -> Result<RosterOutcome<ClientListing>, StoreError> {
        let outcome = self.resolver.resolve(query.scope).await;

        let needle = query.search.as_deref().map(str::trim).unwrap_or_default();
        let outcome = outcome.map_roster(|roster| {
            roster
                .into_iter()
                .filter(|view| view.name.contains_ignore_case(needle))
                .collect::<Vec<_>>()
        });

        if outcome.roster().is_none_or(<[ClientView]>::is_empty) {
            return Ok(outcome.map(|client| ClientListing {
                client,
                home_shop_name: None,
                last_prescription: None,
            }));
        }

        let (shop_names, last_visits) = tokio::try_join!(
            super::shop_names(self.store.as_ref()),
            self.last_prescriptions()
        )?;

        Ok(outcome.map(|client| ClientListing {
            home_shop_name: client
                .home_shop
                .and_then(|id| shop_names.get(&id).cloned()),
            last_prescription: last_visits.get(&client.id).copied(),
            client,
        }))
    }

    /// Most recent prescription date per client.
    async fn last_prescriptions(&self) -> Result<HashMap<ClientId, NaiveDate>, StoreError> {
        let records = self
            .store
            .find_prescriptions(PrescriptionQuery::default(), PrescriptionOrder::DateDesc)
            .await?;

        let mut latest = HashMap::new();
        for record in records {
            // Newest first, so the first date seen per client wins.
            latest
                .entry(record.prescription.client_id)
                .or_insert(record.prescription.prescribed_on);
        }
        Ok(latest)
    }
}
