//! Export, share and search over the chat history

use super::message::{Message, Role};
use super::session::Session;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Downloadable snapshot of every session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub sessions: Vec<ExportedSession>,
    pub export_date: DateTime<Utc>,
    pub total_sessions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedSession {
    #[serde(flatten)]
    pub session: Session,
    pub messages: Vec<Message>,
}

impl ExportDocument {
    pub fn new(sessions: Vec<ExportedSession>, now: DateTime<Utc>) -> Self {
        Self {
            total_sessions: sessions.len(),
            sessions,
            export_date: now,
        }
    }

    /// Suggested download name, e.g. `chat-history-2024-05-01.json`
    pub fn file_name(&self) -> String {
        format!("chat-history-{}.json", self.export_date.format("%Y-%m-%d"))
    }
}

/// Plain-text transcript for sharing; `None` when there is nothing to share
pub fn transcript(messages: &[Message]) -> Option<String> {
    if messages.is_empty() {
        return None;
    }
    let lines: Vec<String> = messages
        .iter()
        .map(|m| {
            let speaker = match m.role {
                Role::User => "You",
                Role::Assistant => "AI",
            };
            format!("{speaker}: {}", m.text)
        })
        .collect();
    Some(lines.join("\n\n"))
}

/// Case-insensitive substring search, results in log order
pub fn search<'a>(messages: &'a [Message], query: &str) -> Vec<&'a Message> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    messages
        .iter()
        .filter(|m| m.text.to_lowercase().contains(&needle))
        .collect()
}
