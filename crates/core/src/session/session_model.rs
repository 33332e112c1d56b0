//! Session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile as reported by the backend.
///
/// All fields except `id` and `username` are opaque display data; the
/// client never derives behavior from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub occupation: Option<String>,
    pub location: Option<String>,
    pub profile_picture_url: Option<String>,
    pub member_since: Option<DateTime<Utc>>,
}

/// Credentials submitted on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Whether boot-time session resolution has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Resolving,
    Resolved,
}

/// The session store's state: identity (or none), resolution phase, and an
/// error slot for explicit sign-in failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub identity: Option<UserProfile>,
    pub phase: SessionPhase,
    pub error: Option<String>,
}

impl SessionState {
    /// True once boot-time resolution has finished, with or without identity.
    pub fn is_resolved(&self) -> bool {
        self.phase == SessionPhase::Resolved
    }

    /// True when an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            phase: SessionPhase::Resolving,
            error: None,
        }
    }
}

/// Advisory record of the last-known identity.
///
/// Used only to seed boot-time resolution; the backend session check is
/// authoritative and a negative check clears the marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionMarker {
    pub user_id: String,
    pub username: String,
    pub saved_at: DateTime<Utc>,
}

impl SessionMarker {
    /// Build a marker from a resolved profile.
    pub fn for_profile(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id.clone(),
            username: profile.username.clone(),
            saved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            username: "ada".to_string(),
            email: Some("ada@example.com".to_string()),
            display_name: None,
            bio: None,
            occupation: None,
            location: None,
            profile_picture_url: None,
            member_since: None,
        }
    }

    #[test]
    fn default_state_is_unresolved_and_anonymous() {
        let state = SessionState::default();
        assert!(!state.is_resolved());
        assert!(!state.is_authenticated());
        assert!(state.error.is_none());
    }

    #[test]
    fn marker_copies_identity_fields() {
        let marker = SessionMarker::for_profile(&profile());
        assert_eq!(marker.user_id, "u-1");
        assert_eq!(marker.username, "ada");
    }

    #[test]
    fn profile_serializes_camel_case() {
        let json = serde_json::to_value(profile()).unwrap();
        assert!(json.get("profilePictureUrl").is_some());
        assert!(json.get("memberSince").is_some());
    }
}
