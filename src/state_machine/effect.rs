//! Effects produced by state transitions

use std::time::Duration;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the user's message to the active session
    AppendUserMessage { text: String },

    /// Call the completion client with the rolling context plus `user_text`
    RequestCompletion { user_text: String },

    /// Extend the rolling context with a finished exchange
    RecordExchange {
        session_id: String,
        user_text: String,
        reply: String,
    },

    /// Wake the machine with `RevealDelayElapsed` after `delay`
    ScheduleReveal { delay: Duration },

    /// Append an assistant message (real reply or fallback)
    AppendAssistantMessage { session_id: String, text: String },
}
