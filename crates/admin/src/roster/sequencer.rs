//! Stale-result protection for overlapping roster resolutions.
//!
//! When a caller switches scope faster than the store answers, an older
//! resolution can finish after a newer one. Each request takes a token at
//! issue time; only the latest token's result is accepted.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use optica_core::Scope;

use super::{RosterOutcome, RosterResolver};
use crate::store::EntityStore;

/// Identifies one issued request. Later requests get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing request tokens.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a token, superseding every token issued before it.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Pass `value` through only if `token` is still current.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            tracing::debug!(token = token.0, "Discarding stale result");
            None
        }
    }
}

/// A resolver whose results are discarded once superseded.
///
/// For long-lived callers that re-resolve as the scope changes, such as a
/// picker whose shop filter is switched while a load is in flight. One-shot
/// callers (HTTP handlers, the CLI) use [`RosterResolver`] directly.
pub struct RosterFeed<S: ?Sized> {
    resolver: RosterResolver<S>,
    sequencer: RequestSequencer,
}

impl<S: EntityStore + ?Sized> RosterFeed<S> {
    #[must_use]
    pub const fn new(resolver: RosterResolver<S>) -> Self {
        Self {
            resolver,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Start resolving `scope`.
    ///
    /// The token is issued when `begin` is called, not when the returned
    /// future is first polled. The future yields `None` if another request
    /// was begun before this one completed.
    pub fn begin(
        &self,
        scope: Scope,
    ) -> impl Future<Output = Option<(RequestToken, RosterOutcome)>> + '_ {
        let token = self.sequencer.issue();
        async move {
            let outcome = self.resolver.resolve(scope).await;
            self.sequencer.accept(token, (token, outcome))
        }
    }

    /// Whether `token` belongs to the latest request.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.sequencer.is_current(token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use optica_core::{ClientName, ShopId};

    use super::*;
    use crate::models::{CreateClientInput, CreateShopInput};
    use crate::store::MemoryStore;
    use crate::store::memory::Table;

    #[test]
    fn test_tokens_increase() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_accept_only_latest() {
        let sequencer = RequestSequencer::new();
        let stale = sequencer.issue();
        let fresh = sequencer.issue();

        assert_eq!(sequencer.accept(stale, "old"), None);
        assert_eq!(sequencer.accept(fresh, "new"), Some("new"));
    }

    async fn store_with_two_shops() -> (Arc<MemoryStore>, ShopId, ShopId) {
        let store = Arc::new(
            MemoryStore::new().with_latency(Table::Clients, Duration::from_millis(50)),
        );
        let mut shops = Vec::new();
        for (shop_name, client_name) in [("Ótica Avenida", "Alice"), ("Ótica Boa Vista", "Bruno")]
        {
            let shop = store
                .add_shop(CreateShopInput {
                    name: shop_name.to_string(),
                    ..CreateShopInput::default()
                })
                .await;
            store
                .add_client(CreateClientInput::new(
                    ClientName::parse(client_name).unwrap(),
                    Some(shop.id),
                ))
                .await;
            shops.push(shop.id);
        }
        (store, shops[0], shops[1])
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_resolution_is_discarded() {
        let (store, shop_a, shop_b) = store_with_two_shops().await;
        let feed = RosterFeed::new(RosterResolver::new(store));

        let stale = feed.begin(Scope::Shop(shop_a));
        let fresh = feed.begin(Scope::Shop(shop_b));
        let (stale, fresh) = tokio::join!(stale, fresh);

        assert!(stale.is_none());
        let (token, outcome) = fresh.unwrap();
        assert!(feed.is_current(token));
        let roster = outcome.into_roster().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name.as_str(), "Bruno");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_resolutions_are_all_accepted() {
        let (store, shop_a, shop_b) = store_with_two_shops().await;
        let feed = RosterFeed::new(RosterResolver::new(store));

        assert!(feed.begin(Scope::Shop(shop_a)).await.is_some());
        assert!(feed.begin(Scope::Shop(shop_b)).await.is_some());
    }
}
