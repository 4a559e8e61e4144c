//! AI Provider Port - interface for the model provider boundary.
//!
//! The assessment engine needs exactly one capability from the model side:
//! turn a prompt string into a completion string. Everything else (reply
//! validation, fallback behavior) lives in the domain parser, so a provider
//! implementation only reports transport-level failures here.

use async_trait::async_trait;

/// Port for text generation against an external model provider.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generates a completion for the given prompt.
    ///
    /// A successful return means the provider produced text; whether that
    /// text parses into a valid assessment reply is the caller's concern.
    ///
    /// # Errors
    ///
    /// Transport and provider failures only (network, auth, quota, timeout).
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Provider information for logging and health reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g., "gemini-pro").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Model provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to decode the provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AiError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn AiProvider) {}
    }

    #[test]
    fn ai_error_displays_correctly() {
        let err = AiError::RateLimited {
            retry_after_secs: 30,
        };
        assert_eq!(err.to_string(), "rate limited: retry after 30s");

        let err = AiError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "request timed out after 30s");

        let err = AiError::unavailable("down for maintenance");
        assert_eq!(err.to_string(), "provider unavailable: down for maintenance");
    }

    #[test]
    fn provider_info_holds_name_and_model() {
        let info = ProviderInfo::new("gemini", "gemini-pro");
        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, "gemini-pro");
    }
}
