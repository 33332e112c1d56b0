//! AI chat view controller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use stockdesk_core::chat::{AnalysisRequest, ChatRequest};

use crate::context::ServiceContext;

/// Who said what in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript line. Lives in view memory only; nothing about the
/// conversation is persisted client-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatEntry {
    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Drives the chat widget: free-form messages plus templated analysis
/// requests. One request at a time; the input is disabled while a reply
/// is outstanding.
pub struct ChatView {
    ctx: Arc<ServiceContext>,
    transcript: Vec<ChatEntry>,
    pending: bool,
    error: Option<String>,
}

impl ChatView {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            transcript: Vec::new(),
            pending: false,
            error: None,
        }
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sends a free-form message. The user's line stays in the transcript
    /// even when the request fails, so a retry reads naturally.
    pub async fn send(&mut self, user_id: &str, text: &str) -> bool {
        if self.pending || text.trim().is_empty() {
            return false;
        }
        self.error = None;
        self.transcript.push(ChatEntry::new(ChatRole::User, text));
        self.pending = true;
        let result = self
            .ctx
            .chat
            .send_message(&ChatRequest {
                user_id: user_id.to_string(),
                message: text.to_string(),
            })
            .await;
        self.pending = false;

        match result {
            Ok(reply) => {
                self.transcript
                    .push(ChatEntry::new(ChatRole::Assistant, reply.text));
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }

    /// Requests a templated analysis; the reply joins the transcript as
    /// an assistant line.
    pub async fn analyze(&mut self, request: AnalysisRequest) -> bool {
        if self.pending {
            return false;
        }
        if let Err(e) = request.validate() {
            self.error = Some(e.user_message());
            return false;
        }
        self.error = None;
        self.pending = true;
        let result = self.ctx.chat.request_analysis(&request).await;
        self.pending = false;

        match result {
            Ok(reply) => {
                self.transcript
                    .push(ChatEntry::new(ChatRole::Assistant, reply.text));
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }
}
