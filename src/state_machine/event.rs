//! Events that drive a submission

use crate::llm::FailureClass;

#[derive(Debug, Clone)]
pub enum Event {
    /// User pressed send in `session_id`
    UserSubmit { session_id: String, text: String },

    /// Completion client returned a reply
    CompletionSucceeded { reply: String },

    /// Completion client failed; only the class survives past this point
    CompletionFailed { class: FailureClass },

    /// The reveal delay after the typing indicator has passed
    RevealDelayElapsed,
}
