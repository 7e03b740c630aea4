//! OpenAI LLM Provider
//!
//! Implements the LLMProvider trait against the OpenAI chat-completions
//! API. The API key is read from the `OPENAI_API_KEY` environment
//! variable at construction time; it never lives in the config file.
//! Requests pin `temperature` to 0 so repeated identical queries produce
//! stable answers.

use super::{LLMError, LLMProvider, Message, Result};
use crate::config::OpenAIConfig;
use async_trait::async_trait;
use serde_json::json;

pub struct OpenAIProvider {
    config: OpenAIConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider, reading the API key from the
    /// `OPENAI_API_KEY` environment variable.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            config,
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider with an explicit API key. Used by tests and by
    /// callers that manage the key themselves.
    pub fn with_api_key(config: OpenAIConfig, api_key: impl Into<String>) -> Self {
        Self {
            config,
            api_key: Some(api_key.into()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn is_local(&self) -> bool {
        false
    }

    async fn check_health(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LLMError::AuthenticationFailed("OPENAI_API_KEY is not set".to_string())
        })?;

        let url = format!("{}/chat/completions", self.config.base_url);

        let mut api_messages = Vec::new();
        for msg in messages {
            api_messages.push(json!({
                "role": msg.role.to_string(),
                "content": msg.content
            }));
        }

        let payload = json!({
            "model": self.config.model,
            "messages": api_messages,
            "temperature": 0,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LLMError::AuthenticationFailed(text));
            } else if status.as_u16() == 429 {
                return Err(LLMError::RateLimitExceeded);
            } else {
                return Err(LLMError::InvalidRequest(text));
            }
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        let content = data
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| LLMError::ParseError("No content in response".to_string()))?;

        Ok(content.to_string())
    }
}
