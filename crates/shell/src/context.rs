//! Service context - the dependency-injected bundle behind every view.

use std::sync::Arc;

use stockdesk_api_client::BackendClient;
use stockdesk_core::api::{AuthApi, ChatApi, GoalsApi, StocksApi, TransactionsApi, WatchlistApi};
use stockdesk_core::errors::Result;
use stockdesk_core::events::{NoOpStoreEventSink, StoreEventSink};
use stockdesk_core::portfolio::PortfolioStore;
use stockdesk_core::session::{
    FileSessionMarkerStore, InMemorySessionMarkerStore, SessionMarkerStore, SessionState,
    SessionStore,
};

use crate::config::Config;

/// Everything a view controller needs, wired once at startup and passed
/// around by `Arc`. No ambient singletons: tests build isolated contexts
/// around the core mock backend.
pub struct ServiceContext {
    pub config: Config,
    pub auth: Arc<dyn AuthApi>,
    pub stocks: Arc<dyn StocksApi>,
    pub watchlist: Arc<dyn WatchlistApi>,
    pub goals: Arc<dyn GoalsApi>,
    pub transactions: Arc<dyn TransactionsApi>,
    pub chat: Arc<dyn ChatApi>,
    pub session_store: Arc<SessionStore>,
    pub portfolio_store: Arc<PortfolioStore>,
    pub session_markers: Arc<dyn SessionMarkerStore>,
}

impl ServiceContext {
    /// Builds the production context: one HTTP client behind every
    /// capability trait, stores wired to a shared event sink, marker
    /// store per configuration.
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let client = Arc::new(BackendClient::new(
            &config.api_base_url,
            config.http_timeout,
        )?);
        let events: Arc<dyn StoreEventSink> = Arc::new(NoOpStoreEventSink);
        let session_markers: Arc<dyn SessionMarkerStore> = match &config.session_marker_path {
            Some(path) => Arc::new(FileSessionMarkerStore::new(path.clone())),
            None => Arc::new(InMemorySessionMarkerStore::new()),
        };

        Ok(Arc::new(Self {
            auth: client.clone(),
            stocks: client.clone(),
            watchlist: client.clone(),
            goals: client.clone(),
            transactions: client.clone(),
            chat: client,
            session_store: Arc::new(SessionStore::new(events.clone())),
            portfolio_store: Arc::new(PortfolioStore::new(events)),
            session_markers,
            config,
        }))
    }

    /// Builds a context with every capability slot provided explicitly.
    #[allow(clippy::too_many_arguments)]
    pub fn with_components(
        config: Config,
        auth: Arc<dyn AuthApi>,
        stocks: Arc<dyn StocksApi>,
        watchlist: Arc<dyn WatchlistApi>,
        goals: Arc<dyn GoalsApi>,
        transactions: Arc<dyn TransactionsApi>,
        chat: Arc<dyn ChatApi>,
        session_markers: Arc<dyn SessionMarkerStore>,
        events: Arc<dyn StoreEventSink>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            auth,
            stocks,
            watchlist,
            goals,
            transactions,
            chat,
            session_store: Arc::new(SessionStore::new(events.clone())),
            portfolio_store: Arc::new(PortfolioStore::new(events)),
            session_markers,
        })
    }

    /// Test wiring: the core mock backend behind every capability slot,
    /// in-memory marker store, no event sink.
    pub fn with_backend(
        config: Config,
        backend: Arc<stockdesk_core::api::mock::MockBackend>,
    ) -> Arc<Self> {
        Self::with_components(
            config,
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
            Arc::new(InMemorySessionMarkerStore::new()),
            Arc::new(NoOpStoreEventSink),
        )
    }

    /// Boot-time session resolution against this context's auth API and
    /// marker store.
    pub async fn resolve_session(&self) -> SessionState {
        self.session_store
            .resolve(self.auth.as_ref(), self.session_markers.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use stockdesk_core::api::mock::MockBackend;

    use crate::guard::{RouteDecision, RouteGuard};

    #[tokio::test]
    async fn anonymous_boot_resolves_and_the_guard_preserves_the_path() {
        let ctx = ServiceContext::with_backend(Config::default(), Arc::new(MockBackend::new()));

        // Before resolution the guard renders nothing
        let state = ctx.session_store.snapshot();
        assert_eq!(
            RouteGuard::evaluate(&state, "/dashboard"),
            RouteDecision::Pending
        );

        let state = ctx.resolve_session().await;
        assert!(state.is_resolved());
        assert!(!state.is_authenticated());
        assert_eq!(
            RouteGuard::evaluate(&state, "/dashboard"),
            RouteDecision::RedirectToSignIn {
                return_to: "/dashboard".to_string()
            }
        );
    }
}
