//! Portfolio module - snapshot models and the portfolio/stocks store.

mod portfolio_model;
mod portfolio_store;

pub use portfolio_model::{
    OptionPosition, PerformanceMetrics, PortfolioSnapshot, Position, SectorWeight,
};
pub use portfolio_store::{PortfolioState, PortfolioStore};
