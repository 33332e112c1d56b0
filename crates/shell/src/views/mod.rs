//! View controllers - one per screen, all headless.
//!
//! Each controller owns its refresh tasks and in-flight flags; rendering
//! and input wiring belong to the embedder. First-load failures surface
//! through [`LoadPhase::Failed`]; background refresh failures only log.

mod chat;
mod dashboard;
mod profile;
mod sign_in;
mod trading;

pub use chat::{ChatEntry, ChatRole, ChatView};
pub use dashboard::DashboardView;
pub use profile::ProfileView;
pub use sign_in::SignInView;
pub use trading::TradingView;

/// First-load lifecycle of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    /// The first load failed; the message replaces the screen.
    Failed(String),
}

impl LoadPhase {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadPhase::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}
