//! Chat and analysis request models.
//!
//! All analysis happens on the backend; the client only ships the
//! request shape and renders the returned natural-language text.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A free-form chat message to the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

/// The assistant's natural-language reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: String,
}

/// Templated analysis flavors the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Stock,
    Portfolio,
    Market,
    Options,
    TradingSuggestion,
}

impl AnalysisKind {
    /// Whether this analysis is about one specific symbol.
    pub fn requires_symbol(&self) -> bool {
        matches!(self, AnalysisKind::Stock | AnalysisKind::Options)
    }
}

/// A templated analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub user_id: String,
    pub kind: AnalysisKind,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl AnalysisRequest {
    /// Presence-only validation before the request is sent.
    pub fn validate(&self) -> Result<()> {
        if self.kind.requires_symbol() && self.symbol.as_deref().unwrap_or("").trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_bound_analyses_require_a_symbol() {
        let request = AnalysisRequest {
            user_id: "u-1".to_string(),
            kind: AnalysisKind::Stock,
            symbol: None,
        };
        assert!(request.validate().is_err());

        let request = AnalysisRequest {
            symbol: Some("AAPL".to_string()),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn portfolio_analysis_needs_no_symbol() {
        let request = AnalysisRequest {
            user_id: "u-1".to_string(),
            kind: AnalysisKind::Portfolio,
            symbol: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn kind_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&AnalysisKind::TradingSuggestion).unwrap();
        assert_eq!(json, "\"trading_suggestion\"");
    }
}
