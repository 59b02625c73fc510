//! Message log
//!
//! Append-only message lists, one per session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message; never modified after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub session_id: String,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct MessageLog {
    logs: HashMap<String, Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        session_id: &str,
        role: Role,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Message {
        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role,
            text: text.into(),
            created_at: now,
        };
        let log = self.logs.entry(session_id.to_string()).or_default();
        log.push(message);
        &log[log.len() - 1]
    }

    /// Messages of one session in insertion order
    pub fn messages(&self, session_id: &str) -> &[Message] {
        self.logs.get(session_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty_for(&self, session_id: &str) -> bool {
        self.messages(session_id).is_empty()
    }

    pub fn find(&self, message_id: &str) -> Option<&Message> {
        self.logs
            .values()
            .flat_map(|log| log.iter())
            .find(|m| m.id == message_id)
    }

    pub fn remove_session(&mut self, session_id: &str) {
        self.logs.remove(session_id);
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }
}
