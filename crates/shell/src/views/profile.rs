//! Profile view controller - inline editing and social browse.

use std::sync::Arc;

use stockdesk_core::editing::InlineFieldEditor;
use stockdesk_core::errors::{Error, Result, ValidationError};
use stockdesk_core::session::UserProfile;

use super::LoadPhase;
use crate::context::ServiceContext;

/// The profile fields that swap to an inline input on double-click.
const EDITABLE_FIELDS: [&str; 4] = ["displayName", "bio", "occupation", "location"];

/// Drives the profile screen: inline-editable fields with optimistic
/// save and rollback, profile picture updates, and the social browse
/// listing.
pub struct ProfileView {
    ctx: Arc<ServiceContext>,
    phase: LoadPhase,
    profile: Option<UserProfile>,
    editor: InlineFieldEditor,
    picture_error: Option<String>,
}

impl ProfileView {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            phase: LoadPhase::Loading,
            profile: None,
            editor: InlineFieldEditor::new(),
            picture_error: None,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn editor(&self) -> &InlineFieldEditor {
        &self.editor
    }

    /// Input plumbing (activation, drafts, Escape) goes straight to the
    /// editor; only commits need the async path below.
    pub fn editor_mut(&mut self) -> &mut InlineFieldEditor {
        &mut self.editor
    }

    pub fn picture_error(&self) -> Option<&str> {
        self.picture_error.as_deref()
    }

    /// First load: fetch the profile and seed the editable fields.
    pub async fn load(&mut self, user_id: &str) {
        self.phase = LoadPhase::Loading;
        match self.ctx.auth.get_profile(user_id).await {
            Ok(profile) => {
                self.seed_editor(&profile);
                self.profile = Some(profile);
                self.phase = LoadPhase::Ready;
            }
            Err(e) => {
                self.phase = LoadPhase::Failed(e.user_message());
            }
        }
    }

    fn seed_editor(&mut self, profile: &UserProfile) {
        for field in EDITABLE_FIELDS {
            let value = match field {
                "displayName" => profile.display_name.clone(),
                "bio" => profile.bio.clone(),
                "occupation" => profile.occupation.clone(),
                "location" => profile.location.clone(),
                _ => None,
            };
            self.editor.insert_field(field, value.unwrap_or_default());
        }
    }

    /// Commits a field edit (blur/Enter). Leaves edit mode immediately
    /// with the submitted value shown, then reconciles with the save
    /// outcome: confirmed saves commit, failed saves roll back and leave
    /// the error on the field.
    pub async fn commit_field(&mut self, field: &str) {
        let Some(request) = self.editor.commit(field) else {
            return;
        };
        let Some(user_id) = self.profile.as_ref().map(|p| p.id.clone()) else {
            return;
        };

        match self
            .ctx
            .auth
            .update_profile_field(&user_id, &request.field, &request.value)
            .await
        {
            Ok(updated) => {
                self.editor.save_confirmed(field);
                self.sync_identity(&updated);
                self.profile = Some(updated);
            }
            Err(e) => {
                self.editor.save_failed(field, e.user_message());
            }
        }
    }

    /// Saves a new profile picture URL. The URL is parsed before the
    /// request is sent; a malformed one becomes an inline error without
    /// touching the backend.
    pub async fn update_picture(&mut self, url_text: &str) -> bool {
        self.picture_error = None;
        if url::Url::parse(url_text).is_err() {
            let err = Error::from(ValidationError::InvalidUrl(url_text.to_string()));
            self.picture_error = Some(err.user_message());
            return false;
        }
        let Some(user_id) = self.profile.as_ref().map(|p| p.id.clone()) else {
            return false;
        };

        match self
            .ctx
            .auth
            .update_profile_picture(&user_id, url_text)
            .await
        {
            Ok(updated) => {
                self.sync_identity(&updated);
                self.profile = Some(updated);
                true
            }
            Err(e) => {
                self.picture_error = Some(e.user_message());
                false
            }
        }
    }

    /// Keeps the session store's identity in step when the user edited
    /// their own profile.
    fn sync_identity(&self, updated: &UserProfile) {
        let session = self.ctx.session_store.snapshot();
        if session
            .identity
            .as_ref()
            .is_some_and(|current| current.id == updated.id)
        {
            self.ctx.session_store.set_identity(Some(updated.clone()));
        }
    }

    /// The social-browse listing.
    pub async fn browse(&self) -> Result<Vec<UserProfile>> {
        self.ctx.auth.browse_profiles().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::api::mock::MockBackend;

    use crate::config::Config;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            username: "ada".to_string(),
            email: None,
            display_name: Some("Ada".to_string()),
            bio: Some("Value investor".to_string()),
            occupation: None,
            location: None,
            profile_picture_url: None,
            member_since: None,
        }
    }

    async fn view_for(ctx: &Arc<ServiceContext>) -> ProfileView {
        let mut view = ProfileView::new(ctx.clone());
        view.load("u-1").await;
        view
    }

    #[tokio::test]
    async fn load_seeds_the_editor_from_the_profile() {
        let backend = Arc::new(MockBackend::new());
        backend.set_session(Some(profile()));
        let ctx = ServiceContext::with_backend(Config::default(), backend);
        let view = view_for(&ctx).await;

        assert!(view.phase().is_ready());
        assert_eq!(view.editor().display_value("bio"), Some("Value investor"));
        assert_eq!(view.editor().display_value("location"), Some(""));
    }

    #[tokio::test]
    async fn committed_edit_saves_once_and_updates_identity() {
        let backend = Arc::new(MockBackend::new());
        backend.set_session(Some(profile()));
        let ctx = ServiceContext::with_backend(Config::default(), backend.clone());
        ctx.session_store.set_identity(Some(profile()));
        let mut view = view_for(&ctx).await;

        view.editor_mut().activate("bio");
        view.editor_mut().set_draft("bio", "Day trader");
        view.commit_field("bio").await;

        assert_eq!(backend.calls_matching("updateProfile:u-1:bio"), 1);
        assert_eq!(view.editor().display_value("bio"), Some("Day trader"));
        let identity = ctx.session_store.snapshot().identity.unwrap();
        assert_eq!(identity.bio.as_deref(), Some("Day trader"));
    }

    #[tokio::test]
    async fn escape_cancels_without_a_request() {
        let backend = Arc::new(MockBackend::new());
        backend.set_session(Some(profile()));
        let ctx = ServiceContext::with_backend(Config::default(), backend.clone());
        let mut view = view_for(&ctx).await;

        view.editor_mut().activate("bio");
        view.editor_mut().set_draft("bio", "Day trader");
        view.editor_mut().cancel("bio");
        view.commit_field("bio").await;

        assert_eq!(backend.calls_matching("updateProfile:"), 0);
        assert_eq!(view.editor().display_value("bio"), Some("Value investor"));
    }

    #[tokio::test]
    async fn failed_save_rolls_the_field_back() {
        let backend = Arc::new(MockBackend::new());
        backend.set_session(Some(profile()));
        let ctx = ServiceContext::with_backend(Config::default(), backend.clone());
        let mut view = view_for(&ctx).await;

        view.editor_mut().activate("bio");
        view.editor_mut().set_draft("bio", "x".repeat(10_000));
        backend.fail_next("Bio is too long");
        view.commit_field("bio").await;

        assert_eq!(view.editor().display_value("bio"), Some("Value investor"));
        assert_eq!(view.editor().error("bio"), Some("Bio is too long"));
    }

    #[tokio::test]
    async fn malformed_picture_url_is_rejected_before_the_request() {
        let backend = Arc::new(MockBackend::new());
        backend.set_session(Some(profile()));
        let ctx = ServiceContext::with_backend(Config::default(), backend.clone());
        let mut view = view_for(&ctx).await;

        assert!(!view.update_picture("not a url").await);
        assert!(view.picture_error().is_some());
        assert_eq!(backend.calls_matching("updatePicture:"), 0);
    }

    #[tokio::test]
    async fn valid_picture_url_updates_the_profile() {
        let backend = Arc::new(MockBackend::new());
        backend.set_session(Some(profile()));
        let ctx = ServiceContext::with_backend(Config::default(), backend.clone());
        let mut view = view_for(&ctx).await;

        assert!(
            view.update_picture("https://cdn.example.com/ada.png")
                .await
        );
        assert_eq!(
            view.profile().unwrap().profile_picture_url.as_deref(),
            Some("https://cdn.example.com/ada.png")
        );
        assert!(view.picture_error().is_none());
    }
}
