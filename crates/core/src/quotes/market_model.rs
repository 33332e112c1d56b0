//! Market overview and symbol search models.
//!
//! These are pass-through shapes: fetched on demand for display, never
//! held in a store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Quote;

/// Price snapshot for a market index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub change: Decimal,
    pub percent_change: Decimal,
}

/// Market overview panel data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub indices: Vec<IndexSnapshot>,
    #[serde(default)]
    pub gainers: Vec<Quote>,
    #[serde(default)]
    pub losers: Vec<Quote>,
}

/// One hit from symbol search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSearchResult {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub exchange: Option<String>,
}
