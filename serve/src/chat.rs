//! `POST /chat`: the last user message goes to the two-tier chat model.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use harper::llm::DEFAULT_TEMPERATURE;
use harper::{LlmError, LlmErrorKind, Message};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Content of the last `user` message, or the 400 explaining what is missing.
fn last_user_message(messages: &[ChatMessage]) -> Result<&str, ApiError> {
    if messages.is_empty() {
        return Err(ApiError::bad_request("At least one message is required"));
    }
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.as_str())
        .ok_or_else(|| ApiError::bad_request("At least one user message is required"))
}

fn chat_error(err: LlmError) -> ApiError {
    match (&err, err.kind()) {
        (LlmError::MissingCredential { env_var, .. }, _) => ApiError::internal(format!(
            "{} environment variable is not set. Please set it in your .env file or environment.",
            env_var
        )),
        (_, LlmErrorKind::Authentication) => ApiError::new(
            StatusCode::UNAUTHORIZED,
            "OpenAI API authentication failed. Please check your API key.",
        ),
        (_, LlmErrorKind::RateLimited) => ApiError::new(
            StatusCode::TOO_MANY_REQUESTS,
            "OpenAI API rate limit exceeded. Please try again later.",
        ),
        (LlmError::FallbackExhausted { .. }, _) => ApiError::internal(err.to_string()),
        _ => ApiError::internal(format!("OpenAI API error: {}", err)),
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let input = last_user_message(&request.messages)?.to_string();
    let model = state.models.chat().map_err(chat_error)?;
    debug!(model = %model.model_name(), input_chars = input.len(), "chat request");

    let messages = [Message::user(input)];
    let call = model.complete(&messages, DEFAULT_TEMPERATURE);
    let reply = tokio::time::timeout(state.request_timeout, call)
        .await
        .map_err(|_| ApiError::timeout("Chat request", state.request_timeout.as_secs()))?
        .map_err(chat_error)?;
    info!(reply_chars = reply.len(), "chat reply");
    Ok(Json(ChatResponse { response: reply }))
}
