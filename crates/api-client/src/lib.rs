//! Stockdesk API client - HTTP implementation of the backend traits.
//!
//! The backend is a plain HTTP JSON API; this crate provides the one
//! [`BackendClient`] that implements every capability trait defined in
//! `stockdesk-core::api`. Consumers hold the trait objects, not this
//! type, so tests can substitute the core mock backend.

mod client;

pub use client::{BackendClient, DEFAULT_API_BASE_URL};
