//! Submission state types

use crate::llm::FailureClass;
use serde::Serialize;
use std::time::Duration;

/// Where the chat is in answering the latest user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmitState {
    /// Ready for user input
    #[default]
    Idle,

    /// Completion request in flight; the typing indicator is up
    Sending {
        session_id: String,
        user_text: String,
    },

    /// Reply received, held back until the reveal delay has passed
    Succeeded { session_id: String, reply: String },

    /// Request failed; the fallback sentence lands after the same delay
    Failed {
        session_id: String,
        class: FailureClass,
    },
}

impl SubmitState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmitState::Idle)
    }

    /// Whether the typing indicator should be shown
    pub fn is_typing(&self) -> bool {
        matches!(self, SubmitState::Sending { .. })
    }

    /// Session the pending reply belongs to
    #[allow(dead_code)] // State query utility
    pub fn session_id(&self) -> Option<&str> {
        match self {
            SubmitState::Idle => None,
            SubmitState::Sending { session_id, .. }
            | SubmitState::Succeeded { session_id, .. }
            | SubmitState::Failed { session_id, .. } => Some(session_id),
        }
    }
}

/// Fixed configuration for the state machine
#[derive(Debug, Clone)]
pub struct SubmitContext {
    /// Pause between hiding the typing indicator and appending the reply
    pub reply_delay: Duration,
}

impl SubmitContext {
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }
}
