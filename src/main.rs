//! Banter - a single-user chat assistant backed by Gemini
//!
//! Keeps chat sessions in memory and answers each message with one
//! completion request over a rolling window of recent turns.

mod api;
mod chat;
mod config;
mod llm;
mod reveal;
mod runtime;
mod settings;
mod state_machine;

use api::{create_router, AppState};
use chat::ChatCore;
use config::AppConfig;
use llm::{GeminiService, LlmService, LoggingService};
use runtime::ChatRuntime;
use state_machine::SubmitContext;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banter=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env()?;

    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; every reply will be a fallback message");
    }

    let gemini = GeminiService::new(&config.gemini)?;
    tracing::info!(
        model = %gemini.model_id(),
        history_turns = config.history_turns,
        reply_delay_ms = %config.reply_delay.as_millis(),
        "Completion client initialized"
    );
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(gemini)));

    // Create application state
    let runtime = ChatRuntime::new(
        ChatCore::new(config.history_turns),
        llm,
        SubmitContext::new(config.reply_delay),
    );
    let state = AppState::new(runtime);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::new(config.bind, config.port);
    tracing::info!("Banter server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
