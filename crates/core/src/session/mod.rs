//! Session module - identity state, resolution, and the advisory marker.

mod marker;
mod session_model;
mod session_store;

pub use marker::{FileSessionMarkerStore, InMemorySessionMarkerStore, SessionMarkerStore};
pub use session_model::{Credentials, SessionMarker, SessionPhase, SessionState, UserProfile};
pub use session_store::SessionStore;
