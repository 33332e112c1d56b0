//! Sign-in view controller.

use std::sync::Arc;

use tracing::warn;

use stockdesk_core::session::{Credentials, SessionMarker};

use crate::context::ServiceContext;

/// Drives the credentials form. The submit control is disabled while a
/// request is outstanding; failures land in the session store's error
/// slot for inline display.
pub struct SignInView {
    ctx: Arc<ServiceContext>,
    pending: bool,
}

impl SignInView {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            pending: false,
        }
    }

    /// True while a sign-in request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Submits credentials. Returns true on success; the identity lands
    /// in the session store and the advisory marker is written.
    pub async fn submit(&mut self, credentials: Credentials) -> bool {
        if self.pending {
            return false;
        }
        self.ctx.session_store.clear_error();
        self.pending = true;
        let result = self.ctx.auth.sign_in(&credentials).await;
        self.pending = false;

        match result {
            Ok(profile) => {
                if let Err(e) = self
                    .ctx
                    .session_markers
                    .save(&SessionMarker::for_profile(&profile))
                {
                    // Advisory only: a failed marker write never blocks sign-in
                    warn!("Failed to persist session marker: {}", e);
                }
                self.ctx.session_store.set_identity(Some(profile));
                true
            }
            Err(e) => {
                self.ctx.session_store.set_error(e.user_message());
                false
            }
        }
    }

    /// Tears the session down: backend first, then local state. Local
    /// state clears even when the backend call fails.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.ctx.auth.sign_out().await {
            warn!("Backend sign-out failed: {}", e);
        }
        if let Err(e) = self.ctx.session_markers.clear() {
            warn!("Failed to clear session marker: {}", e);
        }
        self.ctx.session_store.set_identity(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::api::mock::MockBackend;
    use stockdesk_core::session::UserProfile;

    use crate::config::Config;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            username: "ada".to_string(),
            email: None,
            display_name: None,
            bio: None,
            occupation: None,
            location: None,
            profile_picture_url: None,
            member_since: None,
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "ada".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_sign_in_sets_identity_and_marker() {
        let backend = Arc::new(MockBackend::new());
        backend.set_sign_in_profile(profile());
        let ctx = ServiceContext::with_backend(Config::default(), backend);
        let mut view = SignInView::new(ctx.clone());

        assert!(view.submit(credentials()).await);

        let state = ctx.session_store.snapshot();
        assert!(state.is_authenticated());
        assert!(state.error.is_none());
        assert_eq!(ctx.session_markers.load().unwrap().username, "ada");
    }

    #[tokio::test]
    async fn failed_sign_in_surfaces_backend_detail_verbatim() {
        let backend = Arc::new(MockBackend::new());
        let ctx = ServiceContext::with_backend(Config::default(), backend);
        let mut view = SignInView::new(ctx.clone());

        assert!(!view.submit(credentials()).await);

        let state = ctx.session_store.snapshot();
        assert!(!state.is_authenticated());
        assert_eq!(state.error.as_deref(), Some("Invalid username or password"));
        assert!(ctx.session_markers.load().is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_identity_and_marker() {
        let backend = Arc::new(MockBackend::new());
        backend.set_sign_in_profile(profile());
        let ctx = ServiceContext::with_backend(Config::default(), backend);
        let mut view = SignInView::new(ctx.clone());

        view.submit(credentials()).await;
        view.sign_out().await;

        assert!(!ctx.session_store.snapshot().is_authenticated());
        assert!(ctx.session_markers.load().is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_local_state_even_when_backend_fails() {
        let backend = Arc::new(MockBackend::new());
        backend.set_sign_in_profile(profile());
        let ctx = ServiceContext::with_backend(Config::default(), backend.clone());
        let mut view = SignInView::new(ctx.clone());

        view.submit(credentials()).await;
        backend.fail_next("backend down");
        view.sign_out().await;

        assert!(!ctx.session_store.snapshot().is_authenticated());
        assert!(ctx.session_markers.load().is_none());
    }
}
