//! Anthropic Messages API client (ChatAnthropic).
//!
//! System entries go in the top-level `system` field; observations are sent as user turns and
//! adjacent turns with the same role are merged so the conversation alternates.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::message::Message;

use super::http::{error_for_status, transport_error};
use super::{LlmClient, LlmError, Provider};

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic Messages API client.
///
/// **Interaction**: Selected by `ModelClient` for `claude*` models.
pub struct ChatAnthropic {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl ChatAnthropic {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Base URL without the `/v1` segment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn request_body(&self, messages: &[Message], temperature: f32) -> Value {
        let system: Vec<&str> = messages
            .iter()
            .filter_map(|m| match m {
                Message::System(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();

        let mut turns: Vec<(&'static str, String)> = Vec::new();
        for m in messages {
            let role = match m {
                Message::System(_) => continue,
                Message::User(_) | Message::Observation(_) => "user",
                Message::Assistant(_) => "assistant",
            };
            match turns.last_mut() {
                Some((last_role, text)) if *last_role == role => {
                    text.push_str("\n\n");
                    text.push_str(m.content());
                }
                _ => turns.push((role, m.content().to_string())),
            }
        }
        let turns: Vec<Value> = turns
            .into_iter()
            .map(|(role, content)| json!({ "role": role, "content": content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": temperature,
            "messages": turns,
        });
        if !system.is_empty() {
            body["system"] = json!(system.join("\n\n"));
        }
        body
    }
}

/// Concatenated text blocks of a Messages API response.
fn response_text(body: &Value) -> Option<String> {
    let parts: Vec<&str> = body
        .get("content")?
        .as_array()?
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}

#[async_trait]
impl LlmClient for ChatAnthropic {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.request_body(messages, temperature);
        debug!(
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            temperature,
            max_tokens = self.max_tokens,
            "Anthropic messages create"
        );
        trace!(request = %body, "Anthropic request body");

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;
        if !status.is_success() {
            return Err(error_for_status(Provider::Anthropic, status, &text));
        }
        trace!(response = %text, "Anthropic response body");

        let value: Value = serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse {
            provider: Provider::Anthropic,
            message: format!("invalid JSON: {}", e),
        })?;
        response_text(&value).ok_or_else(|| LlmError::InvalidResponse {
            provider: Provider::Anthropic,
            message: "response has no text content".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
