//! Chat module - assistant message and analysis request models.

mod chat_model;

pub use chat_model::{AnalysisKind, AnalysisRequest, ChatReply, ChatRequest};
