//! Goals module - savings goal records.

mod goals_model;

pub use goals_model::Goal;
