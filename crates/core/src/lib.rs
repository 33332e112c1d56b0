//! Stockdesk Core - client-side state model for the trading dashboard.
//!
//! This crate contains the headless synchronization logic between the UI
//! and the remote backend: the session and portfolio stores, the refresh
//! task primitive, the trade submission state machine, and the inline
//! field editor. It is transport-agnostic and defines the API traits that
//! are implemented by the `api-client` crate.

pub mod api;
pub mod chat;
pub mod constants;
pub mod editing;
pub mod errors;
pub mod events;
pub mod goals;
pub mod portfolio;
pub mod quotes;
pub mod refresh;
pub mod session;
pub mod trades;
pub mod transactions;
pub mod watchlist;

// Re-export common types from the portfolio and quotes modules
pub use portfolio::*;
pub use quotes::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
