//! Sheet selector node
//!
//! Asks the model which sheets are relevant to the query and parses the
//! response as a JSON array of sheet names. Model output is untrusted
//! input: anything that fails to parse degrades to an empty selection,
//! and parsed names are validated against the closed catalog before they
//! can drive any file access.

use super::{AgentState, Node};
use crate::catalog;
use crate::error::EngineError;
use crate::llm::{extract_json_array, LLMProvider, Message};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub struct SheetSelector {
    llm: Arc<dyn LLMProvider>,
}

impl SheetSelector {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self { llm }
    }

    /// Parse the model's raw response into validated sheet names.
    ///
    /// Parse failures yield an empty list (the answer stage then works
    /// with no data and says so). Unknown names are dropped with a
    /// warning rather than silently reaching the loader.
    fn parse_sheets(content: &str) -> Vec<String> {
        let Some(json_str) = extract_json_array(content) else {
            tracing::warn!(
                response = content,
                "selector response contained no JSON array, using empty selection"
            );
            return Vec::new();
        };

        let names: Vec<String> = match serde_json::from_str(json_str) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "selector response was not a JSON array of strings, using empty selection"
                );
                return Vec::new();
            }
        };

        names
            .into_iter()
            .filter(|name| {
                if catalog::is_known_sheet(name) {
                    true
                } else {
                    tracing::warn!(sheet = %name, "selector returned unknown sheet, dropping");
                    false
                }
            })
            .collect()
    }
}

#[async_trait]
impl Node for SheetSelector {
    fn name(&self) -> &str {
        "select"
    }

    async fn run(&self, mut state: AgentState) -> Result<AgentState> {
        let prompt = [
            Message::system(catalog::SYSTEM_PROMPT),
            Message::user(format!(
                "User query: {}\n\nList only the relevant Google Sheets as a JSON array. \
                 and no markup for json, the result should not contain `",
                state.query
            )),
        ];

        let response = self
            .llm
            .generate(&prompt)
            .await
            .map_err(EngineError::from)
            .context("sheet selection request failed")?;

        state.relevant_sheets = Self::parse_sheets(response.trim());
        tracing::info!(sheets = ?state.relevant_sheets, "selected sheets");

        Ok(state)
    }
}
