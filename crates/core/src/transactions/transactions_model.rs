//! Transaction history models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quotes::ContractType;

/// Kind of historical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Buy,
    Sell,
    OptionBuy,
    OptionSell,
    Deposit,
    Withdrawal,
}

/// Option contract terms attached to an option transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionTerms {
    pub contract_type: ContractType,
    pub strike: Decimal,
    pub expiration: NaiveDate,
    pub premium: Decimal,
}

/// An immutable historical record, fetched read-only for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    #[serde(default)]
    pub symbol: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub option_terms: Option<OptionTerms>,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kind_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&TransactionKind::OptionBuy).unwrap();
        assert_eq!(json, "\"option_buy\"");
    }

    #[test]
    fn cash_transaction_carries_no_symbol() {
        let tx = Transaction {
            id: "t-1".to_string(),
            kind: TransactionKind::Deposit,
            symbol: None,
            amount: dec!(500),
            price: None,
            quantity: None,
            option_terms: None,
            date: Utc::now(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json["symbol"].is_null());
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }
}
