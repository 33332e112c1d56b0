//! Options chain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Options contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractType {
    Call,
    Put,
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractType::Call => f.write_str("call"),
            ContractType::Put => f.write_str("put"),
        }
    }
}

/// One row of an options chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuote {
    pub contract_type: ContractType,
    pub strike: Decimal,
    pub expiration: NaiveDate,
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
    pub volume: Decimal,
    pub open_interest: Decimal,
}

/// Options chain for a symbol, as returned by the backend.
///
/// The client displays the chain as-is; strike/expiration validity is the
/// backend's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsChain {
    pub symbol: String,
    pub expirations: Vec<NaiveDate>,
    pub calls: Vec<OptionQuote>,
    pub puts: Vec<OptionQuote>,
}
