//! Portfolio/stocks store - quote cache, holdings, watchlist, selection.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{OptionPosition, PortfolioSnapshot, Position};
use crate::events::{StoreEvent, StoreEventSink};
use crate::quotes::Quote;
use crate::watchlist::{Watchlist, WatchlistEntry};

/// The portfolio store's state.
///
/// Everything here is a cache of server-authoritative data. Updates are
/// whole-record replacements: quotes replace by symbol key, the holdings
/// block replaces wholesale. Two in-flight fetches race as last-response-
/// wins; requests carry no sequence numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioState {
    pub selected_symbol: Option<String>,
    pub quotes: HashMap<String, Quote>,
    pub positions: Vec<Position>,
    pub options: Vec<OptionPosition>,
    pub cash: Decimal,
    pub total_value: Decimal,
    pub watchlist: Watchlist,
}

impl PortfolioState {
    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }
}

/// Holds the portfolio state behind a watch channel.
///
/// All mutations run as reducers through `send_modify`; reads are cloned
/// snapshots. Constructor-injected like the session store.
pub struct PortfolioStore {
    state: watch::Sender<PortfolioState>,
    events: Arc<dyn StoreEventSink>,
}

impl PortfolioStore {
    pub fn new(events: Arc<dyn StoreEventSink>) -> Self {
        let (state, _) = watch::channel(PortfolioState::default());
        Self { state, events }
    }

    /// Returns a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<PortfolioState> {
        self.state.subscribe()
    }

    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> PortfolioState {
        self.state.borrow().clone()
    }

    pub fn set_selected_symbol(&self, symbol: Option<String>) {
        let event = StoreEvent::SelectedSymbolChanged {
            symbol: symbol.clone(),
        };
        self.state.send_modify(|state| {
            state.selected_symbol = symbol;
        });
        self.events.emit(event);
    }

    /// Replaces the quote entry for its symbol, leaving other symbols
    /// untouched.
    pub fn upsert_quote(&self, quote: Quote) {
        let symbol = quote.symbol.clone();
        self.state.send_modify(|state| {
            state.quotes.insert(quote.symbol.clone(), quote);
        });
        self.events.emit(StoreEvent::quote_upserted(symbol));
    }

    /// Wholesale replacement of the holdings block from a fetch or trade
    /// result. Never merges with the previous snapshot.
    pub fn replace_portfolio(&self, snapshot: PortfolioSnapshot) {
        self.state.send_modify(|state| {
            state.positions = snapshot.positions;
            state.options = snapshot.options;
            state.cash = snapshot.cash;
            state.total_value = snapshot.total_value;
        });
        self.events.emit(StoreEvent::PortfolioReplaced);
    }

    /// Optimistically adds a watchlist symbol as pending.
    ///
    /// Returns false if the symbol was already tracked (no round trip
    /// should be issued in that case).
    pub fn add_watchlist_symbol(&self, symbol: &str) -> bool {
        let mut added = false;
        self.state.send_modify(|state| {
            added = state.watchlist.add_pending(symbol);
        });
        if added {
            self.emit_watchlist();
        }
        added
    }

    /// Optimistically removes a watchlist symbol, returning the entry for
    /// a potential rollback.
    pub fn remove_watchlist_symbol(&self, symbol: &str) -> Option<WatchlistEntry> {
        let mut removed = None;
        self.state.send_modify(|state| {
            removed = state.watchlist.remove(symbol);
        });
        if removed.is_some() {
            self.emit_watchlist();
        }
        removed
    }

    /// Applies the server's watchlist listing wholesale.
    pub fn confirm_watchlist(&self, server_symbols: Vec<String>) {
        self.state.send_modify(|state| {
            state.watchlist.confirm(server_symbols);
        });
        self.emit_watchlist();
    }

    /// Rolls back a failed optimistic add.
    pub fn rollback_watchlist_add(&self, symbol: &str) {
        self.state.send_modify(|state| {
            state.watchlist.discard_pending(symbol);
        });
        self.emit_watchlist();
    }

    /// Rolls back a failed optimistic remove.
    pub fn rollback_watchlist_remove(&self, entry: WatchlistEntry) {
        self.state.send_modify(|state| {
            state.watchlist.restore(entry);
        });
        self.emit_watchlist();
    }

    fn emit_watchlist(&self) {
        let symbols = self.state.borrow().watchlist.symbols();
        self.events.emit(StoreEvent::watchlist_changed(symbols));
    }
}
