//! Store event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::StoreEvent;

/// Trait for receiving store events.
///
/// Stores emit events through this trait after a reducer has run. The
/// implementations translate them into shell-specific reactions.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no disk)
/// - Failure to emit must not affect the store mutation (best-effort)
pub trait StoreEventSink: Send + Sync {
    /// Emit a single store event.
    fn emit(&self, event: StoreEvent);

    /// Emit multiple store events.
    ///
    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<StoreEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// No-op implementation for contexts that don't react to store events.
#[derive(Clone, Default)]
pub struct NoOpStoreEventSink;

impl StoreEventSink for NoOpStoreEventSink {
    fn emit(&self, _event: StoreEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockStoreEventSink {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl MockStoreEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl StoreEventSink for MockStoreEventSink {
    fn emit(&self, event: StoreEvent) {
        self.events.lock().unwrap().push(event);
    }
}
