//! LLM error types

use serde::Serialize;
use thiserror::Error;

/// LLM error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status when the error came from a response
    pub status: Option<u16>,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::InvalidRequest, message)
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::EmptyResponse, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Unknown, message)
    }

    /// The user-facing failure bucket this error falls into
    pub fn class(&self) -> FailureClass {
        FailureClass::classify(&self.message)
    }
}

/// Where the failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Connection failures, timeouts, unreadable bodies
    Network,
    /// 429
    RateLimit,
    /// 5xx
    ServerError,
    /// 401, 403, or no key configured
    Auth,
    /// 400
    InvalidRequest,
    /// 2xx without a usable candidate
    EmptyResponse,
    Unknown,
}

/// Fallback bucket shown to the user in place of the real error.
///
/// Selected from the error message text alone, so the same sentence is
/// produced no matter which layer raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Transport,
    Quota,
    Unknown,
}

pub const TRANSPORT_FALLBACK: &str = concat!(
    "I'm having trouble connecting to my AI service right now. ",
    "Please check your internet connection and try again in a moment.",
);
pub const QUOTA_FALLBACK: &str =
    "I've reached my usage limit for now. Please try again later, or check your API quota.";
pub const UNKNOWN_FALLBACK: &str = concat!(
    "I apologize, but I encountered an unexpected error while processing your request. ",
    "Please try rephrasing your question or try again.",
);

impl FailureClass {
    /// Quota wording wins over the generic "API" marker, which every
    /// message built by the Gemini client carries. Both checks are case
    /// sensitive.
    pub fn classify(message: &str) -> Self {
        if message.contains("quota") || message.contains("limit") {
            FailureClass::Quota
        } else if message.contains("API") {
            FailureClass::Transport
        } else {
            FailureClass::Unknown
        }
    }

    pub fn fallback_message(self) -> &'static str {
        match self {
            FailureClass::Transport => TRANSPORT_FALLBACK,
            FailureClass::Quota => QUOTA_FALLBACK,
            FailureClass::Unknown => UNKNOWN_FALLBACK,
        }
    }
}
