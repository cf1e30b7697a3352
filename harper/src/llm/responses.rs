//! OpenAI Responses API client, used for reasoning models such as `gpt-5`.
//!
//! Raw `reqwest` call: `POST {base}/responses` with `input` messages and an optional
//! `reasoning.effort`. Text is read from `output_text` when present, otherwise collected from
//! the `output_text` parts of `message` items.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::message::Message;

use super::http::{error_for_status, transport_error};
use super::openai::DEFAULT_OPENAI_BASE_URL;
use super::{LlmClient, LlmError, Provider};

/// OpenAI Responses API client.
///
/// **Interaction**: Primary tier of `FallbackChat::openai_default`.
pub struct OpenAiResponses {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    reasoning_effort: Option<String>,
}

impl OpenAiResponses {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: model.into(),
            reasoning_effort: None,
        }
    }

    /// Base URL including the version segment, e.g. `https://api.openai.com/v1`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `minimal`, `low`, `medium` or `high`. When set, temperature is not sent.
    pub fn with_reasoning_effort(mut self, effort: impl Into<String>) -> Self {
        self.reasoning_effort = Some(effort.into());
        self
    }

    fn request_body(&self, messages: &[Message], temperature: f32) -> Value {
        let input: Vec<Value> = messages
            .iter()
            .map(|m| {
                let role = match m {
                    Message::System(_) => "system",
                    Message::User(_) | Message::Observation(_) => "user",
                    Message::Assistant(_) => "assistant",
                };
                json!({ "role": role, "content": m.content() })
            })
            .collect();
        let mut body = json!({ "model": self.model, "input": input });
        match &self.reasoning_effort {
            Some(effort) => body["reasoning"] = json!({ "effort": effort }),
            None => body["temperature"] = json!(temperature),
        }
        body
    }
}

/// Output text from a Responses API body.
fn output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    let parts: Vec<&str> = body
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}

#[async_trait]
impl LlmClient for OpenAiResponses {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        let url = format!("{}/responses", self.base_url);
        let body = self.request_body(messages, temperature);
        debug!(
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            reasoning_effort = ?self.reasoning_effort,
            "OpenAI responses create"
        );
        trace!(request = %body, "OpenAI responses request body");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(Provider::OpenAi, e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| transport_error(Provider::OpenAi, e))?;
        if !status.is_success() {
            return Err(error_for_status(Provider::OpenAi, status, &text));
        }
        trace!(response = %text, "OpenAI responses body");

        let value: Value = serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse {
            provider: Provider::OpenAi,
            message: format!("invalid JSON: {}", e),
        })?;
        output_text(&value).ok_or_else(|| LlmError::InvalidResponse {
            provider: Provider::OpenAi,
            message: "response has no output text".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Text is collected from message items when `output_text` is absent.
    #[test]
    fn output_text_from_message_items() {
        let body = json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "Hello"},
                    {"type": "output_text", "text": " there"}
                ]}
            ]
        });
        assert_eq!(output_text(&body).as_deref(), Some("Hello there"));
        assert_eq!(output_text(&json!({"output": []})), None);
    }

    /// **Scenario**: With a reasoning effort the body carries `reasoning` and no temperature.
    #[test]
    fn request_body_reasoning_effort() {
        let client = OpenAiResponses::new("k", "gpt-5").with_reasoning_effort("minimal");
        let body = client.request_body(&[Message::user("hi")], 0.2);
        assert_eq!(body["reasoning"]["effort"], "minimal");
        assert!(body.get("temperature").is_none());
        assert_eq!(body["input"][0]["role"], "user");
        assert_eq!(body["input"][0]["content"], "hi");
    }
}
