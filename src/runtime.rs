//! Chat runtime
//!
//! Owns the chat core and drives the submission state machine. Transitions
//! and their synchronous effects run under the core lock; the completion
//! call and the reveal delay run in a spawned task with the lock released.

#[cfg(test)]
pub mod testing;

use crate::chat::{ChatCore, ChatError, Message};
use crate::llm::{LlmRequest, LlmService};
use crate::state_machine::{transition, Effect, Event, SubmitContext, SubmitState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

struct Shared {
    core: ChatCore,
    state: SubmitState,
}

/// Work an effect hands back to the drive task
#[derive(Debug)]
enum Deferred {
    Complete(LlmRequest),
    Wait(Duration),
}

#[derive(Debug, Default)]
struct Applied {
    appended: Vec<Message>,
    deferred: Vec<Deferred>,
}

/// An accepted submission
#[derive(Debug)]
pub struct Submission {
    /// The user message as stored (trimmed)
    pub message: Message,
    /// Completes once the assistant message has been appended
    #[allow(dead_code)] // Handlers let the task run detached; tests await it
    pub task: JoinHandle<()>,
}

#[derive(Clone)]
pub struct ChatRuntime {
    shared: Arc<Mutex<Shared>>,
    llm: Arc<dyn LlmService>,
    context: SubmitContext,
}

impl ChatRuntime {
    pub fn new(core: ChatCore, llm: Arc<dyn LlmService>, context: SubmitContext) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                core,
                state: SubmitState::Idle,
            })),
            llm,
            context,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the core and the submission state together
    pub fn view<R>(&self, f: impl FnOnce(&ChatCore, &SubmitState) -> R) -> R {
        let shared = self.lock();
        f(&shared.core, &shared.state)
    }

    /// Mutate the core (session operations)
    pub fn with_core<R>(&self, f: impl FnOnce(&mut ChatCore) -> R) -> R {
        let mut shared = self.lock();
        f(&mut shared.core)
    }

    #[cfg(test)]
    pub fn state(&self) -> SubmitState {
        self.lock().state.clone()
    }

    #[cfg(test)]
    pub fn reply_pending(&self) -> bool {
        !self.lock().state.is_idle()
    }

    #[cfg(test)]
    pub fn is_typing(&self) -> bool {
        self.lock().state.is_typing()
    }

    /// Send `text` from the active session.
    ///
    /// The user message is appended before this returns; the reply follows
    /// from the spawned task.
    pub fn submit(&self, text: &str) -> Result<Submission, ChatError> {
        let (message, deferred) = {
            let mut shared = self.lock();
            let session_id = shared
                .core
                .active_session_id()
                .ok_or(ChatError::NoActiveSession)?
                .to_string();

            let event = Event::UserSubmit {
                session_id: session_id.clone(),
                text: text.to_string(),
            };
            let mut applied = self.apply(&mut shared, event)?;
            let message = applied.appended.pop().ok_or_else(|| {
                ChatError::InvalidTransition("Submission appended no user message".to_string())
            })?;

            tracing::info!(
                session_id = %session_id,
                message_id = %message.id,
                "User message accepted"
            );
            (message, applied.deferred)
        };

        let task = tokio::spawn(self.clone().drive(deferred));
        Ok(Submission { message, task })
    }

    /// Apply one event: transition, then run its effects against the core.
    /// A failed effect restores the previous state.
    fn apply(&self, shared: &mut Shared, event: Event) -> Result<Applied, ChatError> {
        let result = transition(&shared.state, &self.context, event)?;
        let previous = std::mem::replace(&mut shared.state, result.new_state);

        let mut applied = Applied::default();
        for effect in result.effects {
            if let Err(e) = execute_effect(&mut shared.core, effect, &mut applied) {
                shared.state = previous;
                return Err(e);
            }
        }
        Ok(applied)
    }

    fn feed(&self, event: Event) -> Result<Vec<Deferred>, ChatError> {
        let mut shared = self.lock();
        self.apply(&mut shared, event).map(|applied| applied.deferred)
    }

    async fn drive(self, initial: Vec<Deferred>) {
        let mut pending: VecDeque<Deferred> = initial.into();

        while let Some(work) = pending.pop_front() {
            let event = match work {
                Deferred::Complete(request) => match self.llm.complete(&request).await {
                    Ok(response) => Event::CompletionSucceeded {
                        reply: response.text,
                    },
                    Err(e) => {
                        let class = e.class();
                        tracing::warn!(
                            error = %e,
                            kind = ?e.kind,
                            class = ?class,
                            "Completion failed, replying with fallback"
                        );
                        Event::CompletionFailed { class }
                    }
                },
                Deferred::Wait(delay) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    Event::RevealDelayElapsed
                }
            };

            match self.feed(event) {
                Ok(next) => pending.extend(next),
                Err(e) => {
                    tracing::error!(error = %e, "Submission event rejected");
                    break;
                }
            }
        }
    }
}

fn execute_effect(
    core: &mut ChatCore,
    effect: Effect,
    applied: &mut Applied,
) -> Result<(), ChatError> {
    match effect {
        Effect::AppendUserMessage { text } => {
            let message = core.append_user_message(&text)?;
            applied.appended.push(message);
        }

        Effect::RequestCompletion { user_text } => {
            let turns = core.request_turns(&user_text);
            tracing::debug!(turns = turns.len(), "Requesting completion");
            applied
                .deferred
                .push(Deferred::Complete(LlmRequest::new(turns)));
        }

        Effect::RecordExchange {
            session_id,
            user_text,
            reply,
        } => {
            if !core.record_exchange(&session_id, &user_text, &reply) {
                tracing::debug!(
                    session_id = %session_id,
                    "Session no longer active, context not recorded"
                );
            }
        }

        Effect::ScheduleReveal { delay } => {
            applied.deferred.push(Deferred::Wait(delay));
        }

        Effect::AppendAssistantMessage { session_id, text } => {
            match core.append_assistant_message(&session_id, &text) {
                Ok(message) => applied.appended.push(message),
                // The session was deleted while the reply was pending
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "Dropping reply");
                }
            }
        }
    }
    Ok(())
}
