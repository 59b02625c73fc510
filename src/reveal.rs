//! Word-by-word reveal of assistant replies
//!
//! Clients play back a reply one space-separated word per tick. The server
//! only answers "how much is visible after this long".

use crate::chat::{Message, Role};
use serde::Serialize;
use std::time::Duration;

pub const TICK: Duration = Duration::from_millis(60);

/// Visible portion of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    pub message_id: String,
    pub text: String,
    pub words_shown: usize,
    pub total_words: usize,
    pub complete: bool,
}

/// Number of ticks that have passed after `elapsed`
pub fn ticks_for(elapsed: Duration) -> usize {
    usize::try_from(elapsed.as_millis() / TICK.as_millis()).unwrap_or(usize::MAX)
}

/// First `words` space-separated chunks of `text`, rejoined with single spaces
pub fn revealed(text: &str, words: usize) -> String {
    text.split(' ').take(words).collect::<Vec<_>>().join(" ")
}

impl Reveal {
    /// User messages are always shown in full; assistant messages gain one
    /// word per elapsed tick.
    pub fn at(message: &Message, elapsed: Duration) -> Self {
        let total_words = message.text.split(' ').count();
        let words_shown = match message.role {
            Role::User => total_words,
            Role::Assistant => ticks_for(elapsed).min(total_words),
        };

        Self {
            message_id: message.id.clone(),
            text: revealed(&message.text, words_shown),
            words_shown,
            total_words,
            complete: words_shown == total_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(role: Role, text: &str) -> Message {
        Message {
            id: "m1".to_string(),
            session_id: "s1".to_string(),
            role,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks_for(Duration::ZERO), 0);
        assert_eq!(ticks_for(Duration::from_millis(59)), 0);
        assert_eq!(ticks_for(Duration::from_millis(60)), 1);
        assert_eq!(ticks_for(Duration::from_millis(185)), 3);
    }

    #[test]
    fn test_assistant_reveal_progresses() {
        let msg = message(Role::Assistant, "one two three four");

        let start = Reveal::at(&msg, Duration::ZERO);
        assert_eq!(start.text, "");
        assert!(!start.complete);

        let first = Reveal::at(&msg, Duration::from_millis(60));
        assert_eq!(first.text, "one");

        let mid = Reveal::at(&msg, Duration::from_millis(130));
        assert_eq!(mid.text, "one two");
        assert_eq!(mid.words_shown, 2);

        let done = Reveal::at(&msg, Duration::from_secs(5));
        assert_eq!(done.text, "one two three four");
        assert!(done.complete);
        assert_eq!(done.total_words, 4);
    }

    #[test]
    fn test_user_messages_are_not_animated() {
        let msg = message(Role::User, "hello there friend");
        let reveal = Reveal::at(&msg, Duration::ZERO);
        assert_eq!(reveal.text, "hello there friend");
        assert!(reveal.complete);
    }

    #[test]
    fn test_revealed_keeps_empty_chunks() {
        // Double spaces produce empty words, which count as ticks
        assert_eq!(revealed("a  b", 2), "a ");
        assert_eq!(revealed("a  b", 3), "a  b");
    }
}
