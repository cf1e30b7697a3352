//! Axum app: shared state and router.
//!
//! Routes: `GET /health`, `POST /chat` (also `/chat-gpt-5`), `POST /react`. State holds the
//! read-only tool registry and prompts plus the model factory; nothing mutable is shared
//! between requests.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use harper::{PromptBuilder, SearchSettings, ToolRegistry};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::{ModelFactory, ProviderModelFactory};
use crate::{chat, health, react};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_ITERATIONS_CAP: u32 = 20;

/// Shared state for all handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub(crate) tools: Arc<ToolRegistry>,
    pub(crate) prompts: Arc<PromptBuilder>,
    pub(crate) models: Arc<dyn ModelFactory>,
    pub(crate) request_timeout: Duration,
    pub(crate) max_iterations_cap: u32,
    /// Per-node enter/exit logging for `/react` runs. Off by default.
    pub(crate) node_logging: bool,
}

impl AppState {
    /// Built-in tools and the given model factory, with default limits.
    pub fn new(models: Arc<dyn ModelFactory>) -> Self {
        Self::with_tools(
            models,
            ToolRegistry::with_builtin_tools(SearchSettings::from_env()),
        )
    }

    /// Provider models and built-in tools, all configured from the environment.
    pub fn from_env() -> Self {
        Self::new(Arc::new(ProviderModelFactory::from_env()))
    }

    pub fn with_tools(models: Arc<dyn ModelFactory>, tools: ToolRegistry) -> Self {
        let prompts = PromptBuilder::from_registry(&tools);
        Self {
            tools: Arc::new(tools),
            prompts: Arc::new(prompts),
            models,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_iterations_cap: DEFAULT_MAX_ITERATIONS_CAP,
            node_logging: false,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_iterations_cap(mut self, cap: u32) -> Self {
        self.max_iterations_cap = cap;
        self
    }

    pub fn with_node_logging(mut self, enabled: bool) -> Self {
        self.node_logging = enabled;
        self
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.names()
    }
}

/// Builds the router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/chat", post(chat::chat))
        .route("/chat-gpt-5", post(chat::chat))
        .route("/react", post(react::react))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
