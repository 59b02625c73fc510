//! Session title and preview derivation
//!
//! Titles come from the first user message; previews track the latest
//! message in either direction.

/// Characters kept from the first message when deriving a title
pub const TITLE_MAX_CHARS: usize = 30;
/// Characters kept from the latest message in the sidebar preview
pub const PREVIEW_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Title for a session whose first user message is `text`.
pub fn derive_title(text: &str) -> String {
    truncate_chars(text, TITLE_MAX_CHARS)
}

/// Sidebar preview for the latest message text.
pub fn derive_preview(text: &str) -> String {
    truncate_chars(text, PREVIEW_MAX_CHARS)
}

/// Keep the first `max` characters, appending an ellipsis only when
/// something was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().nth(max).is_none() {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
