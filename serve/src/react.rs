//! `POST /react`: run the ReAct agent for one query.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use harper::agent::react::{DEFAULT_MAX_ITERATIONS, DEFAULT_MODEL};
use harper::{AgentConfig, LlmError, ReactOutcome, ReactRunner};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReactRequest {
    pub query: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn agent_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::internal(format!("ReAct agent error: {}", err))
}

fn model_error(err: LlmError) -> ApiError {
    match err {
        LlmError::MissingCredential { env_var, .. } => {
            ApiError::internal(format!("{} environment variable is not set.", env_var))
        }
        other => agent_error(other),
    }
}

fn agent_config(state: &AppState, request: &ReactRequest) -> AgentConfig {
    AgentConfig::default()
        .with_model_name(request.model.as_str())
        .with_max_iterations(request.max_iterations)
        .with_node_logging(state.node_logging)
}

pub async fn react(
    State(state): State<AppState>,
    payload: Result<Json<ReactRequest>, JsonRejection>,
) -> Result<Json<ReactOutcome>, ApiError> {
    let Json(request) = payload?;
    if request.max_iterations > state.max_iterations_cap {
        return Err(ApiError::bad_request(format!(
            "max_iterations must be at most {}",
            state.max_iterations_cap
        )));
    }

    let llm = state.models.react(&request.model).map_err(model_error)?;
    let config = agent_config(&state, &request);
    let runner = ReactRunner::new(
        llm,
        state.tools.clone(),
        state.prompts.clone(),
        config,
    )
    .map_err(agent_error)?;

    let outcome = tokio::time::timeout(state.request_timeout, runner.run(&request.query))
        .await
        .map_err(|_| ApiError::timeout("ReAct agent", state.request_timeout.as_secs()))?
        .map_err(agent_error)?;
    info!(
        model = %request.model,
        steps = outcome.reasoning_steps.len(),
        tools_used = ?outcome.tools_used,
        "react request complete"
    );
    Ok(Json(outcome))
}
