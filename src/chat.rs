//! Chat core
//!
//! Owns the session list, the per-session message logs and the rolling
//! request context. Everything here is synchronous; the runtime holds the
//! core behind a lock and never awaits while holding it.

mod export;
mod history;
mod message;
mod session;
mod stats;
mod title;

pub use export::{ExportDocument, ExportedSession};
pub use history::HistoryWindow;
pub use message::{Message, MessageLog, Role};
pub use session::{DeleteOutcome, Session, SessionStore};
pub use stats::ChatStats;
pub use title::{derive_preview, derive_title};

use crate::llm::Turn;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message text is empty")]
    EmptyInput,
    #[error("No active session")]
    NoActiveSession,
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("A reply is already pending for this chat")]
    ReplyPending,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

#[derive(Debug)]
pub struct ChatCore {
    sessions: SessionStore,
    messages: MessageLog,
    history: HistoryWindow,
}

impl ChatCore {
    /// Start with a single fresh session, as the UI does on first load
    pub fn new(history_turns: usize) -> Self {
        let mut core = Self {
            sessions: SessionStore::new(),
            messages: MessageLog::new(),
            history: HistoryWindow::new(history_turns),
        };
        core.create_session();
        core
    }

    // ==================== Sessions ====================

    pub fn create_session(&mut self) -> Session {
        let session = self.sessions.create(Utc::now()).clone();
        self.history.reset();
        tracing::debug!(session_id = %session.id, "Session created");
        session
    }

    /// Unknown ids are ignored
    pub fn select_session(&mut self, id: &str) -> bool {
        if !self.sessions.select(id) {
            tracing::debug!(session_id = %id, "Ignoring select of unknown session");
            return false;
        }
        self.history.reset();
        true
    }

    pub fn delete_session(&mut self, id: &str) -> DeleteOutcome {
        let outcome = self.sessions.delete(id, Utc::now());
        match &outcome {
            DeleteOutcome::NotFound => {}
            DeleteOutcome::Removed => self.messages.remove_session(id),
            DeleteOutcome::Promoted { active_id } | DeleteOutcome::Replaced { active_id } => {
                self.messages.remove_session(id);
                self.history.reset();
                tracing::debug!(deleted = %id, active = %active_id, "Active session deleted");
            }
        }
        outcome
    }

    pub fn rename_session(&mut self, id: &str, title: &str) -> bool {
        self.sessions.rename(id, title)
    }

    /// Remove every session and message, then start over with one session
    pub fn clear_all(&mut self) -> Session {
        self.sessions.clear();
        self.messages.clear();
        self.create_session()
    }

    // ==================== Messages ====================

    /// Append a user message to the active session.
    ///
    /// The first message of a session also names it.
    pub fn append_user_message(&mut self, text: &str) -> Result<Message, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        let session_id = self
            .sessions
            .active_id()
            .ok_or(ChatError::NoActiveSession)?
            .to_string();

        let now = Utc::now();
        if self.messages.is_empty_for(&session_id) {
            self.sessions.set_title(&session_id, derive_title(text));
        }
        let message = self
            .messages
            .append(&session_id, Role::User, text, now)
            .clone();
        self.sessions
            .update_preview(&session_id, derive_preview(text), now);
        Ok(message)
    }

    /// Append an assistant message to `session_id`, active or not
    pub fn append_assistant_message(
        &mut self,
        session_id: &str,
        text: &str,
    ) -> Result<Message, ChatError> {
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.sessions.get(session_id).is_none() {
            return Err(ChatError::SessionNotFound(session_id.to_string()));
        }

        let now = Utc::now();
        let message = self
            .messages
            .append(session_id, Role::Assistant, text, now)
            .clone();
        self.sessions
            .update_preview(session_id, derive_preview(text), now);
        Ok(message)
    }

    // ==================== Request context ====================

    pub fn request_turns(&self, pending: &str) -> Vec<Turn> {
        self.history.request_turns(pending)
    }

    /// Extend the rolling context, but only while `session_id` is still the
    /// one on screen; a switch in the meantime already reset it.
    pub fn record_exchange(&mut self, session_id: &str, user_text: &str, reply: &str) -> bool {
        if self.sessions.active_id() != Some(session_id) {
            return false;
        }
        self.history.record_exchange(user_text, reply);
        true
    }

    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ==================== Queries ====================

    pub fn sessions(&self) -> &[Session] {
        self.sessions.list()
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    #[cfg(test)]
    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.active()
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.sessions.active_id()
    }

    pub fn active_messages(&self) -> &[Message] {
        self.sessions
            .active_id()
            .map(|id| self.messages.messages(id))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn messages_for(&self, session_id: &str) -> &[Message] {
        self.messages.messages(session_id)
    }

    pub fn find_message(&self, message_id: &str) -> Option<&Message> {
        self.messages.find(message_id)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> ChatStats {
        ChatStats::compute(self.active_messages(), now)
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        let sessions = self
            .sessions
            .list()
            .iter()
            .map(|s| ExportedSession {
                session: s.clone(),
                messages: self.messages.messages(&s.id).to_vec(),
            })
            .collect();
        ExportDocument::new(sessions, now)
    }

    pub fn transcript(&self) -> Option<String> {
        export::transcript(self.active_messages())
    }

    pub fn search(&self, query: &str) -> Vec<&Message> {
        export::search(self.active_messages(), query)
    }
}
