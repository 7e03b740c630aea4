//! Answer node
//!
//! Issues the final completion: the original query plus the loaded data
//! serialized as indented JSON, under the same fixed system instruction.
//! The raw response text becomes the answer; the fabrication rules live
//! in the prompt, not in code.

use super::{AgentState, Node};
use crate::catalog;
use crate::error::EngineError;
use crate::llm::{LLMProvider, Message};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AnswerNode {
    llm: Arc<dyn LLMProvider>,
}

impl AnswerNode {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node for AnswerNode {
    fn name(&self) -> &str {
        "answer"
    }

    async fn run(&self, mut state: AgentState) -> Result<AgentState> {
        let data_json = serde_json::to_string_pretty(&state.data)
            .context("failed to serialize loaded sheet data")?;

        let prompt = [
            Message::system(catalog::SYSTEM_PROMPT),
            Message::user(format!(
                "User query: {}\n\nRelevant Google Sheets data:\n{}\n\nAnswer the query.",
                state.query, data_json
            )),
        ];

        state.answer = self
            .llm
            .generate(&prompt)
            .await
            .map_err(EngineError::from)
            .context("answer request failed")?;

        Ok(state)
    }
}
