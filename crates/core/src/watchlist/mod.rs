//! Watchlist module - optimistic symbol set with server reconciliation.

mod watchlist_model;

pub use watchlist_model::{Watchlist, WatchlistEntry, WatchlistEntryStatus};
