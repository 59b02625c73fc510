//! Conversation statistics for the stats panel

use super::message::{Message, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    /// Space-separated chunks across all messages
    pub total_words: usize,
    /// Whole minutes since the first message; zero for an empty log
    pub duration_minutes: i64,
}

impl ChatStats {
    pub fn compute(messages: &[Message], now: DateTime<Utc>) -> Self {
        let user_messages = messages.iter().filter(|m| m.role == Role::User).count();
        let assistant_messages = messages.len() - user_messages;
        let total_words = messages.iter().map(|m| m.text.split(' ').count()).sum();
        let duration_minutes = messages
            .first()
            .map_or(0, |first| (now - first.created_at).num_minutes().max(0));

        Self {
            total_messages: messages.len(),
            user_messages,
            assistant_messages,
            total_words,
            duration_minutes,
        }
    }
}
