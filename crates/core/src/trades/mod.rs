//! Trades module - order shapes and the submission state machine.

mod trade_model;
mod trade_ticket;

pub use trade_model::{EquityOrder, OptionOrder, TradeSide};
pub use trade_ticket::{TradePhase, TradeTicket};
