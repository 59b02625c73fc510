//! User interface preferences
//!
//! Kept in memory for the lifetime of the process, like the chat itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_VOICE_SPEED: f32 = 0.5;
pub const MAX_VOICE_SPEED: f32 = 2.0;
pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 20;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("voice_speed must be between {MIN_VOICE_SPEED} and {MAX_VOICE_SPEED}, got {0}")]
    VoiceSpeed(f32),
    #[error("font_size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE}, got {0}")]
    FontSize(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub voice_input: bool,
    pub sound_effects: bool,
    pub voice_speed: f32,
    pub font_size: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            voice_input: true,
            sound_effects: true,
            voice_speed: 1.0,
            font_size: 16,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_VOICE_SPEED..=MAX_VOICE_SPEED).contains(&self.voice_speed) {
            return Err(SettingsError::VoiceSpeed(self.voice_speed));
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(SettingsError::FontSize(self.font_size));
        }
        Ok(())
    }
}
