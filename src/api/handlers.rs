//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, MessagesResponse, QuickPromptsResponse,
    RenameRequest, RevealQuery, SearchQuery, SearchResponse, SessionListResponse,
    SessionResponse, SuccessResponse, TranscriptResponse,
};
use super::{AppState, QUICK_PROMPTS};
use crate::chat::{ChatError, ChatStats, DeleteOutcome, ExportDocument};
use crate::reveal::Reveal;
use crate::settings::Settings;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::time::Duration;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Sessions
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/new", post(create_session))
        .route("/api/sessions/clear", post(clear_sessions))
        .route("/api/sessions/:id/select", post(select_session))
        .route("/api/sessions/:id/delete", post(delete_session))
        .route("/api/sessions/:id/rename", post(rename_session))
        // Messages
        .route("/api/messages", get(list_messages))
        .route("/api/messages/:id/reveal", get(reveal_message))
        .route("/api/chat", post(send_chat))
        // History tools
        .route("/api/stats", get(get_stats))
        .route("/api/export", get(export_history))
        .route("/api/transcript", get(get_transcript))
        .route("/api/search", get(search_messages))
        // Preferences
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/quick-prompts", get(list_quick_prompts))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Sessions
// ============================================================

async fn list_sessions(State(state): State<AppState>) -> Json<SessionListResponse> {
    Json(state.runtime.view(|core, submit| SessionListResponse {
        sessions: core.sessions().to_vec(),
        active_session_id: core.active_session_id().map(str::to_string),
        reply_pending: !submit.is_idle(),
    }))
}

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.runtime.with_core(|core| core.create_session());
    Json(SessionResponse { session })
}

async fn select_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<SuccessResponse> {
    // Unknown ids leave the selection as it was
    let success = state.runtime.with_core(|core| core.select_session(&id));
    Json(SuccessResponse { success })
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionListResponse>, AppError> {
    let outcome = state.runtime.with_core(|core| core.delete_session(&id));
    if outcome == DeleteOutcome::NotFound {
        return Err(AppError::NotFound(format!("Session not found: {id}")));
    }
    Ok(list_sessions(State(state)).await)
}

async fn rename_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    state.runtime.with_core(|core| {
        if core.session(&id).is_none() {
            return Err(AppError::NotFound(format!("Session not found: {id}")));
        }
        // Blank titles are ignored, the session keeps its name
        core.rename_session(&id, &req.title);
        core.session(&id)
            .cloned()
            .map(|session| Json(SessionResponse { session }))
            .ok_or_else(|| AppError::Internal(format!("Session vanished: {id}")))
    })
}

async fn clear_sessions(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.runtime.with_core(|core| core.clear_all());
    tracing::info!(session_id = %session.id, "All chat history cleared");
    Json(SessionResponse { session })
}

// ============================================================
// Messages
// ============================================================

async fn list_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    Json(state.runtime.view(|core, submit| MessagesResponse {
        session_id: core.active_session_id().map(str::to_string),
        messages: core.active_messages().to_vec(),
        reply_pending: !submit.is_idle(),
        typing: submit.is_typing(),
    }))
}

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), AppError> {
    // The reply is appended by the runtime task; clients poll for it
    let submission = state.runtime.submit(&req.text)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ChatResponse {
            queued: true,
            message: submission.message,
        }),
    ))
}

async fn reveal_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RevealQuery>,
) -> Result<Json<Reveal>, AppError> {
    let elapsed = Duration::from_millis(query.elapsed_ms);
    state
        .runtime
        .view(|core, _| core.find_message(&id).map(|m| Reveal::at(m, elapsed)))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Message not found: {id}")))
}

// ============================================================
// History tools
// ============================================================

async fn get_stats(State(state): State<AppState>) -> Json<ChatStats> {
    Json(state.runtime.view(|core, _| core.stats(Utc::now())))
}

async fn export_history(State(state): State<AppState>) -> impl IntoResponse {
    let document: ExportDocument = state.runtime.view(|core, _| core.export(Utc::now()));
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    ([(header::CONTENT_DISPOSITION, disposition)], Json(document))
}

async fn get_transcript(State(state): State<AppState>) -> Json<TranscriptResponse> {
    let transcript = state.runtime.view(|core, _| core.transcript());
    Json(TranscriptResponse { transcript })
}

async fn search_messages(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let results: Vec<_> = state
        .runtime
        .view(|core, _| core.search(&query.q).into_iter().cloned().collect());
    Json(SearchResponse {
        query: query.q,
        results,
    })
}

// ============================================================
// Preferences
// ============================================================

async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    let settings = *state
        .settings
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    Json(settings)
}

async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    update
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    *state
        .settings
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = update;
    tracing::debug!(?update, "Settings updated");
    Ok(Json(update))
}

async fn list_quick_prompts() -> Json<QuickPromptsResponse> {
    Json(QuickPromptsResponse {
        prompts: QUICK_PROMPTS,
    })
}

async fn get_version() -> &'static str {
    concat!("banter ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyInput => AppError::BadRequest(err.to_string()),
            ChatError::ReplyPending => AppError::Conflict(err.to_string()),
            ChatError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            ChatError::NoActiveSession | ChatError::InvalidTransition(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
