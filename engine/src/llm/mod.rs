//! LLM Provider Abstraction Layer
//!
//! This module provides a common interface for interacting with LLM
//! providers (OpenAI, Ollama). The LLMProvider trait defines the contract
//! that all providers must implement, so the pipeline can issue its two
//! completion requests without caring which backend serves them.

use async_trait::async_trait;
use std::fmt;

pub mod ollama;
pub mod openai;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Message in a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: MessageRole,

    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System message
    System,

    /// User message
    User,

    /// Assistant message
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// LLM Provider trait that all providers must implement
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "openai", "ollama")
    fn name(&self) -> &str;

    /// Returns true if this is a local provider (e.g., Ollama)
    fn is_local(&self) -> bool;

    /// Issue one completion request and return the raw response text.
    ///
    /// # Arguments
    /// * `messages` - The system instruction plus the user message
    async fn generate(&self, messages: &[Message]) -> Result<String>;

    /// Check if the provider is currently usable.
    /// Default implementation returns true.
    async fn check_health(&self) -> bool {
        true
    }
}

/// Extract the first bracketed JSON array span from model output.
///
/// Models frequently wrap the requested array in prose or code fences.
/// This scans for the outermost `[` .. `]` pair and returns that slice;
/// `None` when no array-shaped span exists. The caller still has to
/// parse the slice, so a stray bracket pair in prose simply fails there.
pub fn extract_json_array(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    let start = trimmed.find('[')?;
    let end = trimmed.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&trimmed[start..=end])
}
