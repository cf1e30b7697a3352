//! Scripted LLM for tests and examples.
//!
//! Replies are handed out in order (the last one repeats). Failures can be injected for every
//! call or for one call index. Every message list received is recorded for assertions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::message::Message;

use super::{LlmClient, LlmError, Provider};

/// Failure a [`MockLlm`] can be told to produce.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Authentication,
    RateLimited,
    Provider(String),
}

impl MockFailure {
    fn to_error(&self) -> LlmError {
        let provider = Provider::OpenAi;
        match self {
            Self::Authentication => LlmError::Authentication {
                provider,
                message: "Incorrect API key provided".to_string(),
            },
            Self::RateLimited => LlmError::RateLimited {
                provider,
                message: "Rate limit reached".to_string(),
            },
            Self::Provider(message) => LlmError::Provider {
                provider,
                message: message.clone(),
            },
        }
    }
}

/// Mock LLM with queued replies.
///
/// **Interaction**: Implements `LlmClient`; stands in for `ModelClient` in node, runner and
/// HTTP tests.
pub struct MockLlm {
    replies: Vec<String>,
    fail_always: Option<MockFailure>,
    fail_at: Vec<(usize, MockFailure)>,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Replies in order; once exhausted the last reply repeats.
    pub fn with_replies<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            fail_always: None,
            fail_at: Vec::new(),
            delay: None,
            call_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::with_replies([reply.into()])
    }

    /// Every call fails.
    pub fn failing(failure: MockFailure) -> Self {
        let mut mock = Self::with_replies(Vec::<String>::new());
        mock.fail_always = Some(failure);
        mock
    }

    /// The call with zero-based `index` fails; others reply normally.
    pub fn fail_on_call(mut self, index: usize, failure: MockFailure) -> Self {
        self.fail_at.push((index, failure));
        self
    }

    /// Sleeps before answering (for timeout tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every message list received, in call order.
    pub fn prompts(&self) -> Vec<Vec<Message>> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Content of the last message of the most recent call.
    pub fn last_prompt_text(&self) -> Option<String> {
        self.prompts()
            .last()
            .and_then(|msgs| msgs.last().map(|m| m.content().to_string()))
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, messages: &[Message], _temperature: f32) -> Result<String, LlmError> {
        let index = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(messages.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = &self.fail_always {
            return Err(failure.to_error());
        }
        if let Some((_, failure)) = self.fail_at.iter().find(|(i, _)| *i == index) {
            return Err(failure.to_error());
        }
        let reply = self
            .replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_default();
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
