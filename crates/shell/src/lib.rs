//! Stockdesk Shell - headless view controllers and runtime wiring.
//!
//! A UI embeds this crate by building a [`ServiceContext`] from
//! configuration, resolving the session, and driving the view
//! controllers. The controllers own their polling tasks and tear them
//! down when dropped; all rendering stays on the embedder's side.

pub mod config;
pub mod context;
pub mod guard;
pub mod views;

pub use config::Config;
pub use context::ServiceContext;
pub use guard::{RouteDecision, RouteGuard};

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the tracing subscriber for an embedding process.
///
/// Output format is selected by `SD_LOG_FORMAT` ("text" or "json"); the
/// filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let log_format = std::env::var("SD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}
