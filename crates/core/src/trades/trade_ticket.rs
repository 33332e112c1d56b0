//! Trade submission state machine.
//!
//! Per trade action: `Idle -> Submitting -> Idle`. The UI disables its
//! buy/sell controls while `Submitting`; no optimistic update is applied
//! before the backend confirms. A success carries the replacement
//! portfolio snapshot back to the caller, a failure carries the message
//! to display.

use serde::{Deserialize, Serialize};

/// Current phase of a trade control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradePhase {
    #[default]
    Idle,
    Submitting,
}

/// State machine guarding a trade control.
#[derive(Debug, Default)]
pub struct TradeTicket {
    phase: TradePhase,
    last_error: Option<String>,
}

impl TradeTicket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TradePhase {
        self.phase
    }

    /// True while a submission is outstanding; drives control disablement.
    pub fn is_submitting(&self) -> bool {
        self.phase == TradePhase::Submitting
    }

    /// The error from the most recent failed submission, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Attempts to start a submission.
    ///
    /// Returns false while a submission is already outstanding; the caller
    /// must not issue a request in that case.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = TradePhase::Submitting;
        self.last_error = None;
        true
    }

    /// Records a confirmed trade and re-enables the controls.
    pub fn complete_success(&mut self) {
        self.phase = TradePhase::Idle;
        self.last_error = None;
    }

    /// Records a failed trade and re-enables the controls.
    pub fn complete_failure(&mut self, message: impl Into<String>) {
        self.phase = TradePhase::Idle;
        self.last_error = Some(message.into());
    }
}
