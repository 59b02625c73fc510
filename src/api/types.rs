//! API request and response types

use crate::chat::{Message, Session};
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to rename a session
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub title: String,
}

/// Query for the reveal endpoint
#[derive(Debug, Deserialize)]
pub struct RevealQuery {
    #[serde(default)]
    pub elapsed_ms: u64,
}

/// Query for message search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Session list for the sidebar
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<Session>,
    pub active_session_id: Option<String>,
    pub reply_pending: bool,
}

/// Response with a single session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Session,
}

/// Messages of the active session
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub session_id: Option<String>,
    pub messages: Vec<Message>,
    pub reply_pending: bool,
    /// Typing indicator; false again once the reply has arrived but is
    /// still held back by the reveal delay
    pub typing: bool,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub queued: bool,
    pub message: Message,
}

/// Response for the share action
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct QuickPromptsResponse {
    pub prompts: &'static [&'static str],
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
