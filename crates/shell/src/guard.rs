//! Route guard - derived-state gate in front of authenticated screens.

use stockdesk_core::session::SessionState;

/// What the router should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session resolved with an identity: render the screen.
    Allow,
    /// Resolution still in flight: render nothing yet.
    Pending,
    /// No identity: go to sign-in, remembering where the user wanted
    /// to be for the post-login redirect.
    RedirectToSignIn { return_to: String },
}

/// Pure gate over session store state.
///
/// Not a security boundary: no token is validated here, the backend
/// rejects unauthenticated calls regardless.
pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(state: &SessionState, requested_path: &str) -> RouteDecision {
        if !state.is_resolved() {
            return RouteDecision::Pending;
        }
        if state.is_authenticated() {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToSignIn {
                return_to: requested_path.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::session::{SessionPhase, UserProfile};

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

    #[test]
    fn unresolved_session_renders_nothing() {
        let state = SessionState::default();
        assert_eq!(
            RouteGuard::evaluate(&state, "/dashboard"),
            RouteDecision::Pending
        );
    }

    #[test]
    fn anonymous_session_redirects_preserving_the_requested_path() {
        let state = SessionState {
            identity: None,
            phase: SessionPhase::Resolved,
            error: None,
        };
        assert_eq!(
            RouteGuard::evaluate(&state, "/trading/AAPL"),
            RouteDecision::RedirectToSignIn {
                return_to: "/trading/AAPL".to_string()
            }
        );
    }

    #[test]
    fn authenticated_session_is_allowed_through() {
        let state = SessionState {
            identity: Some(profile()),
            phase: SessionPhase::Resolved,
            error: None,
        };
        assert_eq!(
            RouteGuard::evaluate(&state, "/dashboard"),
            RouteDecision::Allow
        );
    }
}
