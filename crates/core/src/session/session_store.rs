//! Session store - the single owner of the authenticated identity.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::watch;

use super::{SessionMarkerStore, SessionPhase, SessionState, UserProfile};
use crate::api::AuthApi;
use crate::events::{StoreEvent, StoreEventSink};

/// Holds the session state behind a watch channel.
///
/// Reducers run through `send_modify`; views subscribe for snapshots and
/// re-render on change. The store is constructor-injected wherever it is
/// needed, never a process-wide singleton.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    events: Arc<dyn StoreEventSink>,
}

impl SessionStore {
    pub fn new(events: Arc<dyn StoreEventSink>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state, events }
    }

    /// Returns a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Boot-time session resolution.
    ///
    /// Consults the advisory marker, then asks the backend whether a
    /// session exists. A failed check is "no session", never a user-facing
    /// error. Idempotent: once resolved, further calls return the current
    /// state without touching the network.
    pub async fn resolve(
        &self,
        auth: &dyn AuthApi,
        marker_store: &dyn SessionMarkerStore,
    ) -> SessionState {
        if self.state.borrow().is_resolved() {
            return self.snapshot();
        }

        let identity = match marker_store.load() {
            None => {
                // Nobody ever signed in here; skip the backend round trip.
                debug!("No session marker present, resolving as anonymous");
                None
            }
            Some(marker) => match auth.check_session().await {
                Ok(Some(profile)) => {
                    info!("Resumed session for {}", profile.username);
                    Some(profile)
                }
                Ok(None) => {
                    // The backend is authoritative: drop the stale marker.
                    debug!("Backend reports no session for {}", marker.username);
                    let _ = marker_store.clear();
                    None
                }
                Err(e) => {
                    // Treated as "no session"; the marker stays for next boot.
                    debug!("Session check failed, resolving as anonymous: {}", e);
                    None
                }
            },
        };

        let authenticated = identity.is_some();
        self.state.send_modify(|state| {
            state.identity = identity;
            state.phase = SessionPhase::Resolved;
            state.error = None;
        });
        self.events.emit(StoreEvent::session_changed(authenticated));
        self.snapshot()
    }

    /// Wholesale identity replacement (sign-in) or clearing (sign-out).
    pub fn set_identity(&self, identity: Option<UserProfile>) {
        let authenticated = identity.is_some();
        self.state.send_modify(|state| {
            state.identity = identity;
            state.phase = SessionPhase::Resolved;
            state.error = None;
        });
        self.events.emit(StoreEvent::session_changed(authenticated));
    }

    /// Records a sign-in failure for the views to display.
    pub fn set_error(&self, message: impl Into<String>) {
        self.state.send_modify(|state| {
            state.error = Some(message.into());
        });
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| {
            state.error = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::events::{MockStoreEventSink, NoOpStoreEventSink};
    use crate::session::{InMemorySessionMarkerStore, SessionMarker};

    fn profile(id: &str, username: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: username.to_string(),
            email: None,
            display_name: None,
            bio: None,
            occupation: None,
            location: None,
            profile_picture_url: None,
            member_since: None,
        }
    }

    #[tokio::test]
    async fn resolve_without_marker_is_anonymous_and_offline() {
        let backend = MockBackend::new();
        let store = SessionStore::new(Arc::new(NoOpStoreEventSink));
        let markers = InMemorySessionMarkerStore::new();

        let state = store.resolve(&backend, &markers).await;

        assert!(state.is_resolved());
        assert!(!state.is_authenticated());
        // No backend call was made
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn resolve_with_marker_resumes_backend_session() {
        let backend = MockBackend::new();
        backend.set_session(Some(profile("u-1", "ada")));
        let store = SessionStore::new(Arc::new(NoOpStoreEventSink));
        let markers = InMemorySessionMarkerStore::new();
        markers
            .save(&SessionMarker::for_profile(&profile("u-1", "ada")))
            .unwrap();

        let state = store.resolve(&backend, &markers).await;

        assert!(state.is_authenticated());
        assert_eq!(state.identity.unwrap().username, "ada");
    }

    #[tokio::test]
    async fn stale_marker_is_cleared_when_backend_denies() {
        let backend = MockBackend::new();
        let store = SessionStore::new(Arc::new(NoOpStoreEventSink));
        let markers = InMemorySessionMarkerStore::new();
        markers
            .save(&SessionMarker::for_profile(&profile("u-1", "ada")))
            .unwrap();

        let state = store.resolve(&backend, &markers).await;

        assert!(state.is_resolved());
        assert!(!state.is_authenticated());
        assert!(markers.load().is_none());
    }

    #[tokio::test]
    async fn failed_check_resolves_anonymous_without_error() {
        let backend = MockBackend::new();
        backend.fail_next("backend down");
        let store = SessionStore::new(Arc::new(NoOpStoreEventSink));
        let markers = InMemorySessionMarkerStore::new();
        markers
            .save(&SessionMarker::for_profile(&profile("u-1", "ada")))
            .unwrap();

        let state = store.resolve(&backend, &markers).await;

        assert!(state.is_resolved());
        assert!(!state.is_authenticated());
        assert!(state.error.is_none());
        // The marker survives a transient failure
        assert!(markers.load().is_some());
    }

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let backend = MockBackend::new();
        backend.set_session(Some(profile("u-1", "ada")));
        let store = SessionStore::new(Arc::new(NoOpStoreEventSink));
        let markers = InMemorySessionMarkerStore::new();
        markers
            .save(&SessionMarker::for_profile(&profile("u-1", "ada")))
            .unwrap();

        store.resolve(&backend, &markers).await;
        let calls_after_first = backend.calls().len();
        store.resolve(&backend, &markers).await;

        assert_eq!(backend.calls().len(), calls_after_first);
    }

    #[tokio::test]
    async fn set_identity_emits_session_changed() {
        let sink = MockStoreEventSink::new();
        let store = SessionStore::new(Arc::new(sink.clone()));

        store.set_identity(Some(profile("u-1", "ada")));
        store.set_identity(None);

        assert_eq!(
            sink.events(),
            vec![
                StoreEvent::SessionChanged {
                    authenticated: true
                },
                StoreEvent::SessionChanged {
                    authenticated: false
                },
            ]
        );
    }

    #[tokio::test]
    async fn error_slot_is_set_and_cleared() {
        let store = SessionStore::new(Arc::new(NoOpStoreEventSink));
        store.set_error("Invalid credentials");
        assert_eq!(
            store.snapshot().error.as_deref(),
            Some("Invalid credentials")
        );
        store.clear_error();
        assert!(store.snapshot().error.is_none());
    }
}
