//! Backend API traits.
//!
//! The remote backend is an opaque collaborator reached over HTTP JSON.
//! These traits define the capability groups the client depends on; the
//! `api-client` crate provides the single HTTP implementation and tests
//! substitute [`mock::MockBackend`]. Keeping the seams here lets every
//! store and view controller stay transport-agnostic.

pub mod mock;

mod traits;

pub use traits::{AuthApi, ChatApi, GoalsApi, StocksApi, TransactionsApi, WatchlistApi};
