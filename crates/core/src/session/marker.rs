//! Advisory session marker persistence.
//!
//! The marker is the only client-side persisted state. It records the
//! last-known identity so boot-time resolution can skip the backend round
//! trip when no user ever signed in on this machine. It is advisory: the
//! backend session check always wins.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, warn};

use super::SessionMarker;
use crate::errors::{Error, Result};

/// Storage interface for the advisory session marker.
pub trait SessionMarkerStore: Send + Sync {
    /// Load the marker, if one was saved. A missing or unreadable marker
    /// is `None`, never an error.
    fn load(&self) -> Option<SessionMarker>;

    /// Persist the marker.
    fn save(&self, marker: &SessionMarker) -> Result<()>;

    /// Remove the marker.
    fn clear(&self) -> Result<()>;
}

/// JSON-file marker store.
pub struct FileSessionMarkerStore {
    path: PathBuf,
}

impl FileSessionMarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionMarkerStore for FileSessionMarkerStore {
    fn load(&self) -> Option<SessionMarker> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No session marker at {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(marker) => Some(marker),
            Err(e) => {
                // A corrupt marker is treated as absent.
                warn!("Discarding unreadable session marker: {}", e);
                None
            }
        }
    }

    fn save(&self, marker: &SessionMarker) -> Result<()> {
        let raw = serde_json::to_string_pretty(marker)
            .map_err(|e| Error::Marker(format!("Failed to encode marker: {}", e)))?;
        fs::write(&self.path, raw)
            .map_err(|e| Error::Marker(format!("Failed to write {}: {}", self.path.display(), e)))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Marker(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-memory marker store for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemorySessionMarkerStore {
    slot: Mutex<Option<SessionMarker>>,
}

impl InMemorySessionMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionMarkerStore for InMemorySessionMarkerStore {
    fn load(&self) -> Option<SessionMarker> {
        self.slot.lock().unwrap().clone()
    }

    fn save(&self, marker: &SessionMarker) -> Result<()> {
        *self.slot.lock().unwrap() = Some(marker.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
