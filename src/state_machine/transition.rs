//! Pure state transition function
//!
//! Idle -> Sending -> {Succeeded | Failed} -> Idle. There is no cancel
//! path and no retry: every submission ends with exactly one assistant
//! message, either the reply or a fixed fallback sentence.

use super::{Effect, Event, SubmitContext, SubmitState};
use crate::chat::ChatError;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SubmitState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SubmitState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message text is empty")]
    EmptyInput,
    #[error("A reply is already pending")]
    ReplyPending,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl From<TransitionError> for ChatError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::EmptyInput => ChatError::EmptyInput,
            TransitionError::ReplyPending => ChatError::ReplyPending,
            TransitionError::InvalidTransition(detail) => ChatError::InvalidTransition(detail),
        }
    }
}

/// Pure transition function: same inputs, same outputs, no I/O.
pub fn transition(
    state: &SubmitState,
    context: &SubmitContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Blank input never leaves the machine
        (SubmitState::Idle, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyInput)
        }

        (SubmitState::Idle, Event::UserSubmit { session_id, text }) => {
            let user_text = text.trim().to_string();
            Ok(TransitionResult::new(SubmitState::Sending {
                session_id,
                user_text: user_text.clone(),
            })
            .with_effect(Effect::AppendUserMessage {
                text: user_text.clone(),
            })
            .with_effect(Effect::RequestCompletion { user_text }))
        }

        (_, Event::UserSubmit { .. }) => Err(TransitionError::ReplyPending),

        (
            SubmitState::Sending {
                session_id,
                user_text,
            },
            Event::CompletionSucceeded { reply },
        ) => Ok(TransitionResult::new(SubmitState::Succeeded {
            session_id: session_id.clone(),
            reply: reply.clone(),
        })
        .with_effect(Effect::RecordExchange {
            session_id: session_id.clone(),
            user_text: user_text.clone(),
            reply,
        })
        .with_effect(Effect::ScheduleReveal {
            delay: context.reply_delay,
        })),

        (SubmitState::Sending { session_id, .. }, Event::CompletionFailed { class }) => {
            Ok(TransitionResult::new(SubmitState::Failed {
                session_id: session_id.clone(),
                class,
            })
            .with_effect(Effect::ScheduleReveal {
                delay: context.reply_delay,
            }))
        }

        (SubmitState::Succeeded { session_id, reply }, Event::RevealDelayElapsed) => {
            Ok(TransitionResult::new(SubmitState::Idle).with_effect(
                Effect::AppendAssistantMessage {
                    session_id: session_id.clone(),
                    text: reply.clone(),
                },
            ))
        }

        (SubmitState::Failed { session_id, class }, Event::RevealDelayElapsed) => {
            Ok(TransitionResult::new(SubmitState::Idle).with_effect(
                Effect::AppendAssistantMessage {
                    session_id: session_id.clone(),
                    text: class.fallback_message().to_string(),
                },
            ))
        }

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}
