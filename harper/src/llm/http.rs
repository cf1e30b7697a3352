//! Status-code classification shared by the `reqwest` based clients.

use reqwest::StatusCode;
use serde_json::Value;

use super::{LlmError, Provider};

/// Maps a non-success HTTP response to an [`LlmError`].
///
/// 401/403 are authentication failures, 429 is a rate limit, everything else is a provider
/// error carrying the status and the provider's own message.
pub(crate) fn error_for_status(provider: Provider, status: StatusCode, body: &str) -> LlmError {
    let message = provider_message(body).unwrap_or_else(|| body.trim().to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication { provider, message }
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { provider, message },
        _ => LlmError::Provider {
            provider,
            message: format!("HTTP {}: {}", status.as_u16(), message),
        },
    }
}

pub(crate) fn transport_error(provider: Provider, err: reqwest::Error) -> LlmError {
    LlmError::Provider {
        provider,
        message: err.to_string(),
    }
}

/// `{"error": {"message": "..."}}`, the shape both OpenAI and Anthropic use.
fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
