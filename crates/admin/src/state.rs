//! Application state shared across handlers.

use std::sync::Arc;

use crate::roster::RosterResolver;
use crate::services::{AssignmentService, ClientListService, DashboardService, PaymentService};
use crate::store::EntityStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn EntityStore>,
    resolver: RosterResolver<dyn EntityStore>,
    client_list: ClientListService<dyn EntityStore>,
    assignment: AssignmentService<dyn EntityStore>,
    payments: PaymentService<dyn EntityStore>,
    dashboard: DashboardService<dyn EntityStore>,
}

impl AppState {
    /// Build the state and its services over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let resolver = RosterResolver::new(Arc::clone(&store));
        Self {
            inner: Arc::new(AppStateInner {
                client_list: ClientListService::new(Arc::clone(&store)),
                assignment: AssignmentService::new(resolver.clone()),
                payments: PaymentService::new(Arc::clone(&store)),
                dashboard: DashboardService::new(Arc::clone(&store)),
                resolver,
                store,
            }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn EntityStore {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn resolver(&self) -> &RosterResolver<dyn EntityStore> {
        &self.inner.resolver
    }

    #[must_use]
    pub fn client_list(&self) -> &ClientListService<dyn EntityStore> {
        &self.inner.client_list
    }

    #[must_use]
    pub fn assignment(&self) -> &AssignmentService<dyn EntityStore> {
        &self.inner.assignment
    }

    #[must_use]
    pub fn payments(&self) -> &PaymentService<dyn EntityStore> {
        &self.inner.payments
    }

    #[must_use]
    pub fn dashboard(&self) -> &DashboardService<dyn EntityStore> {
        &self.inner.dashboard
    }
}
