//! Quotes module - price snapshots, history, options chains, market data.

mod market_model;
mod options_model;
mod quote_model;

pub use market_model::{IndexSnapshot, MarketOverview, SymbolSearchResult};
pub use options_model::{ContractType, OptionQuote, OptionsChain};
pub use quote_model::{Candle, Quote, Timeframe};
