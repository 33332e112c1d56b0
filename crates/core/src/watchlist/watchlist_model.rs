//! Watchlist model.
//!
//! Mutations are optimistic: an add shows up immediately as `Pending` and
//! is expected to be followed by a server round trip. The server refetch
//! replaces the set wholesale, which is what collapses any divergence
//! between the optimistic and confirmed state. A failed round trip rolls
//! the optimistic mutation back.

use serde::{Deserialize, Serialize};

/// Reconciliation status of a watchlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WatchlistEntryStatus {
    /// Applied locally, server round trip still outstanding.
    Pending,
    /// Confirmed by a server fetch.
    Committed,
}

/// A tracked symbol and its reconciliation status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub symbol: String,
    pub status: WatchlistEntryStatus,
}

/// User-curated list of tracked symbols.
///
/// Order follows the server listing; duplicates are impossible by
/// construction (adds are keyed by symbol, confirmation deduplicates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.symbol.clone()).collect()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| e.symbol == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Optimistically adds a symbol as `Pending`.
    ///
    /// Returns false (and leaves the list unchanged) if the symbol is
    /// already present under either status.
    pub fn add_pending(&mut self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into();
        if self.contains(&symbol) {
            return false;
        }
        self.entries.push(WatchlistEntry {
            symbol,
            status: WatchlistEntryStatus::Pending,
        });
        true
    }

    /// Optimistically removes a symbol.
    ///
    /// Returns the removed entry so a failed round trip can restore it.
    pub fn remove(&mut self, symbol: &str) -> Option<WatchlistEntry> {
        let idx = self.entries.iter().position(|e| e.symbol == symbol)?;
        Some(self.entries.remove(idx))
    }

    /// Restores an entry removed optimistically (rollback path).
    pub fn restore(&mut self, entry: WatchlistEntry) {
        if !self.contains(&entry.symbol) {
            self.entries.push(entry);
        }
    }

    /// Rolls back an optimistic add (rollback path).
    pub fn discard_pending(&mut self, symbol: &str) {
        self.entries
            .retain(|e| !(e.symbol == symbol && e.status == WatchlistEntryStatus::Pending));
    }

    /// Replaces the set wholesale with the server listing.
    ///
    /// Every surviving entry becomes `Committed`; duplicates in the server
    /// payload collapse to one entry.
    pub fn confirm(&mut self, server_symbols: Vec<String>) {
        let mut entries = Vec::with_capacity(server_symbols.len());
        for symbol in server_symbols {
            if entries.iter().any(|e: &WatchlistEntry| e.symbol == symbol) {
                continue;
            }
            entries.push(WatchlistEntry {
                symbol,
                status: WatchlistEntryStatus::Committed,
            });
        }
        self.entries = entries;
    }
}
