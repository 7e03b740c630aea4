//! Error types and handling
//!
//! Library-level errors for configuration, record store access, the LLM
//! boundary, and the HTTP server. Provider internals use the richer
//! [`crate::llm::LLMError`] taxonomy; pipeline nodes fold it into
//! `EngineError` before it crosses into orchestration code, which works
//! in `anyhow` with context.

use thiserror::Error;

/// Main engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Record store errors
    #[error("Record store error: {0}")]
    Store(String),

    // LLM provider errors
    #[error("LLM provider error: {0}")]
    LLMProvider(String),

    // HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

impl From<crate::llm::LLMError> for EngineError {
    fn from(err: crate::llm::LLMError) -> Self {
        EngineError::LLMProvider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMError;

    #[test]
    fn test_llm_error_folds_into_provider_variant() {
        let err = EngineError::from(LLMError::RateLimitExceeded);
        assert!(matches!(err, EngineError::LLMProvider(_)));
        assert_eq!(err.to_string(), "LLM provider error: Rate limit exceeded");
    }

    #[test]
    fn test_server_variant_display() {
        let err = EngineError::Server("failed to bind 0.0.0.0:8000".to_string());
        assert_eq!(err.to_string(), "Server error: failed to bind 0.0.0.0:8000");
    }
}
