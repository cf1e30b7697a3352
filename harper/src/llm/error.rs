//! Model-layer errors and their client-facing classification.

use thiserror::Error;

use super::Provider;

/// Error from resolving or calling a model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Credential for the provider is not configured. Raised before any network call.
    #[error("{env_var} environment variable is not set")]
    MissingCredential {
        provider: Provider,
        env_var: &'static str,
    },

    /// Model name matches no known provider prefix.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("{provider} authentication failed: {message}")]
    Authentication { provider: Provider, message: String },

    #[error("{provider} rate limit exceeded: {message}")]
    RateLimited { provider: Provider, message: String },

    /// Any other provider failure (transport, 5xx, bad request).
    #[error("{provider} API error: {message}")]
    Provider { provider: Provider, message: String },

    /// Provider answered but the body had no usable text.
    #[error("{provider} returned an unusable response: {message}")]
    InvalidResponse { provider: Provider, message: String },

    /// Both chat tiers failed.
    #[error("Both {primary_label} and {secondary_label} fallback failed. Primary error: {primary}, Fallback error: {secondary}")]
    FallbackExhausted {
        primary_label: String,
        primary: Box<LlmError>,
        secondary_label: String,
        secondary: Box<LlmError>,
    },
}

/// Coarse class of an [`LlmError`], used to pick an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    Configuration,
    UnsupportedModel,
    Authentication,
    RateLimited,
    Provider,
}

impl LlmError {
    /// For `FallbackExhausted` this is the kind of the last attempted (secondary) tier.
    pub fn kind(&self) -> LlmErrorKind {
        match self {
            Self::MissingCredential { .. } => LlmErrorKind::Configuration,
            Self::UnsupportedModel(_) => LlmErrorKind::UnsupportedModel,
            Self::Authentication { .. } => LlmErrorKind::Authentication,
            Self::RateLimited { .. } => LlmErrorKind::RateLimited,
            Self::Provider { .. } | Self::InvalidResponse { .. } => LlmErrorKind::Provider,
            Self::FallbackExhausted { secondary, .. } => secondary.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Missing credential names the environment variable.
    #[test]
    fn missing_credential_display() {
        let err = LlmError::MissingCredential {
            provider: Provider::Anthropic,
            env_var: "ANTHROPIC_API_KEY",
        };
        assert_eq!(err.to_string(), "ANTHROPIC_API_KEY environment variable is not set");
        assert_eq!(err.kind(), LlmErrorKind::Configuration);
    }

    /// **Scenario**: FallbackExhausted reports both failures and takes the secondary kind.
    #[test]
    fn fallback_exhausted_display_and_kind() {
        let err = LlmError::FallbackExhausted {
            primary_label: "GPT-5 responses API".into(),
            primary: Box::new(LlmError::Provider {
                provider: Provider::OpenAi,
                message: "model not found".into(),
            }),
            secondary_label: "GPT-4".into(),
            secondary: Box::new(LlmError::RateLimited {
                provider: Provider::OpenAi,
                message: "slow down".into(),
            }),
        };
        let s = err.to_string();
        assert!(s.starts_with("Both GPT-5 responses API and GPT-4 fallback failed."), "{}", s);
        assert!(s.contains("model not found"), "{}", s);
        assert!(s.contains("slow down"), "{}", s);
        assert_eq!(err.kind(), LlmErrorKind::RateLimited);
    }
}
