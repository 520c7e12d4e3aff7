//! The roster resolver.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tracing::instrument;

use optica_core::collation::CollationKey;
use optica_core::{ClientId, Provenance, Scope, ShopId};

use super::{ClientView, RosterError, RosterOutcome, RosterWarning};
use crate::models::{
    Client, ClientOrder, ClientQuery, PrescriptionOrder, PrescriptionQuery, PrescriptionRecord,
};
use crate::store::EntityStore;

/// Resolves scopes into rosters against an [`EntityStore`].
///
/// Read-only and stateless between calls; clone freely.
pub struct RosterResolver<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for RosterResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EntityStore + ?Sized> RosterResolver<S> {
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve `scope` into a deduplicated, name-ordered roster.
    ///
    /// The primary fetch (clients whose home shop matches the scope) and,
    /// for shop scopes, the visitor fetch (prescriptions at the shop) are
    /// issued concurrently. A failed primary fetch is an error; a failed
    /// visitor fetch degrades to a partial roster of native clients.
    #[instrument(skip_all, fields(scope = %scope))]
    pub async fn resolve(&self, scope: Scope) -> RosterOutcome {
        let primary = self.store.find_clients(
            ClientQuery::by_home_shop(scope.into()),
            ClientOrder::Name,
        );
        let visitors = async {
            match scope.visitor_shop() {
                Some(shop) => Some(
                    self.store
                        .find_prescriptions(
                            PrescriptionQuery::at_shop(shop),
                            PrescriptionOrder::DateDesc,
                        )
                        .await,
                ),
                None => None,
            }
        };
        let (primary, visitors) = tokio::join!(primary, visitors);

        let natives = match primary {
            Ok(clients) => clients,
            Err(err) => {
                tracing::error!(error = %err, "Primary roster fetch failed");
                return RosterOutcome::Error {
                    reason: RosterError::StoreUnavailable,
                };
            }
        };

        let mut roster = Roster::with_capacity(natives.len());
        for client in &natives {
            roster.insert(ClientView::new(client, Provenance::Native));
        }
        let native_count = roster.len();

        let warning = match (scope.visitor_shop(), visitors) {
            (Some(shop), Some(Ok(records))) => {
                merge_visitors(&mut roster, shop, &records);
                None
            }
            (_, Some(Err(err))) => {
                tracing::warn!(error = %err, "Visitor fetch failed; returning partial roster");
                Some(RosterWarning::PartialVisitorFailure)
            }
            _ => None,
        };

        tracing::debug!(
            natives = native_count,
            visitors = roster.len() - native_count,
            "Roster resolved"
        );

        let roster = roster.into_sorted();
        match warning {
            Some(warning) => RosterOutcome::Partial { roster, warning },
            None => RosterOutcome::Ok { roster },
        }
    }
}

/// Merge visitor candidates from prescription records at `shop`.
fn merge_visitors(roster: &mut Roster, shop: ShopId, records: &[PrescriptionRecord]) {
    let mut dangling = 0_usize;

    for record in records {
        let Some(client) = &record.client else {
            dangling += 1;
            continue;
        };
        if !is_visitor_of(client, shop) {
            continue;
        }
        roster.insert(ClientView::new(client, Provenance::Visitor));
    }

    if dangling > 0 {
        tracing::debug!(
            dangling,
            shop = %shop,
            "Skipped prescriptions referencing missing clients"
        );
    }
}

/// A client is a visitor of `shop` when its home shop is anything else,
/// including no shop at all.
fn is_visitor_of(client: &Client, shop: ShopId) -> bool {
    client.home_shop != Some(shop)
}

/// Insertion-ordered roster, unique by client identity. First write wins.
struct Roster {
    index: HashMap<ClientId, usize>,
    entries: Vec<ClientView>,
}

impl Roster {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, view: ClientView) {
        if let Entry::Vacant(slot) = self.index.entry(view.id) {
            slot.insert(self.entries.len());
            self.entries.push(view);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by display name. Ties keep insertion order.
    fn into_sorted(self) -> Vec<ClientView> {
        let mut entries = self.entries;
        entries.sort_by_cached_key(|view| CollationKey::new(view.name.as_str()));
        entries
    }
}
