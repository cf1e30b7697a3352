//! HTTP server for harper (axum).
//!
//! - `GET /health`: liveness, `{"status": "ok"}`.
//! - `POST /chat` (alias `/chat-gpt-5`): last user message to the gpt-5 / gpt-4 fallback chat.
//! - `POST /react`: the bounded ReAct agent with the built-in tools.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`], [`AppState`].

mod app;
mod chat;
mod error;
mod health;
pub mod logging;
mod models;
mod react;

use tokio::net::TcpListener;
use tracing::info;

pub use app::{router, AppState, DEFAULT_MAX_ITERATIONS_CAP, DEFAULT_REQUEST_TIMEOUT};
pub use chat::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
pub use error::ApiError;
pub use health::HealthResponse;
pub use models::{ModelFactory, ProviderModelFactory};
pub use react::ReactRequest;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Serves on an existing listener. Tests bind `127.0.0.1:0` and pass the listener in.
pub async fn run_serve_on_listener(
    listener: TcpListener,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!(
        addr = %addr,
        tools = ?state.tool_names(),
        timeout_secs = state.request_timeout.as_secs(),
        max_iterations_cap = state.max_iterations_cap,
        "harper server listening on http://{}",
        addr
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Binds `addr` and serves until the process exits.
pub async fn run_serve(
    addr: &str,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, state).await
}
