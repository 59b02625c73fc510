//! HTTP API for the chat
//!
//! JSON endpoints over the chat runtime; a browser front end renders them.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::ChatRuntime;
use crate::settings::Settings;
use std::sync::{Arc, RwLock};

/// Canned prompts offered on an empty chat
pub const QUICK_PROMPTS: &[&str] = &[
    "Explain this in simple terms",
    "Write a summary",
    "Generate ideas about this topic",
    "What are the pros and cons?",
    "How can I improve this?",
    "Create a step-by-step guide",
];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: ChatRuntime,
    pub settings: Arc<RwLock<Settings>>,
}

impl AppState {
    pub fn new(runtime: ChatRuntime) -> Self {
        Self {
            runtime,
            settings: Arc::new(RwLock::new(Settings::default())),
        }
    }
}
