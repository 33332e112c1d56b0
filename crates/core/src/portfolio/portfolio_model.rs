//! Portfolio domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quotes::ContractType;

/// A held equity position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
}

/// A held options contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionPosition {
    pub symbol: String,
    pub contract_type: ContractType,
    pub strike: Decimal,
    pub expiration: NaiveDate,
    pub quantity: Decimal,
    #[serde(default)]
    pub premium: Option<Decimal>,
}

/// Server-authoritative snapshot of the user's holdings.
///
/// Replaced wholesale on every successful fetch or trade result; the
/// client never merges fields from two snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub cash: Decimal,
    pub positions: Vec<Position>,
    pub options: Vec<OptionPosition>,
    pub total_value: Decimal,
}

/// Performance insights panel data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_return: Decimal,
    pub total_return_percent: Decimal,
    pub day_change: Decimal,
    pub day_change_percent: Decimal,
}

/// One slice of the sector allocation chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectorWeight {
    pub sector: String,
    pub weight_percent: Decimal,
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_default_is_empty() {
        let snap = PortfolioSnapshot::default();
        assert!(snap.positions.is_empty());
        assert!(snap.options.is_empty());
        assert_eq!(snap.cash, Decimal::ZERO);
    }

    #[test]
    fn option_position_serializes_contract_type() {
        let pos = OptionPosition {
            symbol: "AAPL".to_string(),
            contract_type: ContractType::Call,
            strike: dec!(180),
            expiration: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            quantity: dec!(2),
            premium: Some(dec!(4.25)),
        };
        let json = serde_json::to_value(&pos).unwrap();
        assert_eq!(json["contractType"], "call");
    }
}
