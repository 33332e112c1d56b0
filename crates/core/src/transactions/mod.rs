//! Transactions module - immutable trade/cash history records.

mod transactions_model;

pub use transactions_model::{OptionTerms, Transaction, TransactionKind};
