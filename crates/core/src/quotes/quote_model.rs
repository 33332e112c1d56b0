//! Quote and price-history models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price snapshot for a trading symbol.
///
/// Entries live in the portfolio store's quote map, keyed by symbol, and
/// are last-write-wins: a refresh fully replaces the entry. No history is
/// retained client-side; charts fetch candles separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub change: Decimal,
    pub percent_change: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// One bar of price history for a chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Chart timeframe selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    Day,
    #[serde(rename = "1W")]
    Week,
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    Year,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl Timeframe {
    /// Wire representation, as the backend expects it in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Day => "1D",
            Timeframe::Week => "1W",
            Timeframe::Month => "1M",
            Timeframe::ThreeMonths => "3M",
            Timeframe::SixMonths => "6M",
            Timeframe::Year => "1Y",
            Timeframe::FiveYears => "5Y",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quote_serializes_camel_case() {
        let quote = Quote {
            symbol: "AAPL".to_string(),
            price: dec!(150.25),
            change: dec!(1.75),
            percent_change: dec!(1.18),
            high: dec!(151.00),
            low: dec!(148.10),
            volume: dec!(48000000),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert!(json.get("percentChange").is_some());
    }

    #[test]
    fn timeframe_round_trips_through_wire_names() {
        for tf in [
            Timeframe::Day,
            Timeframe::Week,
            Timeframe::Month,
            Timeframe::ThreeMonths,
            Timeframe::SixMonths,
            Timeframe::Year,
            Timeframe::FiveYears,
        ] {
            let json = serde_json::to_string(&tf).unwrap();
            assert_eq!(json, format!("\"{}\"", tf.as_str()));
            let back: Timeframe = serde_json::from_str(&json).unwrap();
            assert_eq!(back, tf);
        }
    }
}
