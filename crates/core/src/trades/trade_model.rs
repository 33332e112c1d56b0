//! Trade order models.
//!
//! Validation is presence-only: the backend owns every business rule
//! (affordability, exchange-valid strike/expiration combinations, market
//! hours). The client only refuses orders that are missing fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::quotes::ContractType;

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// An equity order as submitted to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquityOrder {
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: Decimal,
}

impl EquityOrder {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if self.quantity <= Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("quantity must be positive".to_string()).into(),
            );
        }
        Ok(())
    }
}

/// An option order as submitted to the backend.
///
/// Carries the additional required contract terms; their exchange
/// validity is deferred entirely to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionOrder {
    pub symbol: String,
    pub side: TradeSide,
    pub contract_type: ContractType,
    pub strike: Decimal,
    pub premium: Decimal,
    pub expiration: NaiveDate,
    pub contracts: Decimal,
}

impl OptionOrder {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if self.contracts <= Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("contracts must be positive".to_string()).into(),
            );
        }
        if self.strike <= Decimal::ZERO {
            return Err(ValidationError::MissingField("strike".to_string()).into());
        }
        if self.premium < Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("premium cannot be negative".to_string()).into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn option_order() -> OptionOrder {
        OptionOrder {
            symbol: "AAPL".to_string(),
            side: TradeSide::Buy,
            contract_type: ContractType::Call,
            strike: dec!(180),
            premium: dec!(4.25),
            expiration: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            contracts: dec!(1),
        }
    }

    #[test]
    fn equity_order_requires_symbol_and_positive_quantity() {
        let order = EquityOrder {
            symbol: "AAPL".to_string(),
            side: TradeSide::Buy,
            quantity: dec!(10),
        };
        assert!(order.validate().is_ok());

        let blank = EquityOrder {
            symbol: "  ".to_string(),
            ..order.clone()
        };
        assert!(blank.validate().is_err());

        let zero = EquityOrder {
            quantity: Decimal::ZERO,
            ..order
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn option_order_requires_contract_terms() {
        assert!(option_order().validate().is_ok());

        let no_strike = OptionOrder {
            strike: Decimal::ZERO,
            ..option_order()
        };
        assert!(no_strike.validate().is_err());

        let negative_premium = OptionOrder {
            premium: dec!(-1),
            ..option_order()
        };
        assert!(negative_premium.validate().is_err());
    }

    #[test]
    fn far_fetched_strikes_pass_presence_validation() {
        // Exchange validity is the backend's problem
        let weird = OptionOrder {
            strike: dec!(123456.78),
            ..option_order()
        };
        assert!(weird.validate().is_ok());
    }
}
