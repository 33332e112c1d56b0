//! Store event types.

use serde::{Deserialize, Serialize};

/// Events emitted by the state stores after a successful reducer run.
///
/// These represent facts about client-held state changes. Subscribers use
/// them for cross-cutting reactions (refresh triggers, UI badges); the
/// store state itself is read through the watch channels.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The session identity was replaced or cleared.
    SessionChanged { authenticated: bool },

    /// The selected trading symbol changed.
    SelectedSymbolChanged { symbol: Option<String> },

    /// A quote entry was replaced in the quote map.
    QuoteUpserted { symbol: String },

    /// The portfolio snapshot was replaced wholesale.
    PortfolioReplaced,

    /// The watchlist changed (optimistic mutation or server confirmation).
    WatchlistChanged { symbols: Vec<String> },
}

impl StoreEvent {
    /// Creates a SessionChanged event.
    pub fn session_changed(authenticated: bool) -> Self {
        Self::SessionChanged { authenticated }
    }

    /// Creates a QuoteUpserted event.
    pub fn quote_upserted(symbol: impl Into<String>) -> Self {
        Self::QuoteUpserted {
            symbol: symbol.into(),
        }
    }

    /// Creates a WatchlistChanged event from the current symbol set.
    pub fn watchlist_changed(symbols: Vec<String>) -> Self {
        Self::WatchlistChanged { symbols }
    }
}
