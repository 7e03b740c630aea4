//! Select / load / answer pipeline
//!
//! A small linear graph runner and the three nodes it sequences. The
//! graph is fixed: select relevant sheets, load their files, answer the
//! query. No branching, no cycles; each node receives the full state and
//! returns the full state with its own fields replaced.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod answer;
pub mod loader;
pub mod selector;

pub use answer::AnswerNode;
pub use loader::SheetLoader;
pub use selector::SheetSelector;

/// Conversation state threaded through the pipeline stages.
///
/// Created fresh (or resumed from a checkpoint) per invocation; every
/// stage fully overwrites the fields it owns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentState {
    /// The user's query for this invocation
    pub query: String,

    /// Sheet names the selector judged relevant (validated against the catalog)
    pub relevant_sheets: Vec<String>,

    /// Loaded sheet contents, keyed by sheet name. Never contains an
    /// entry for a sheet whose backing file was absent.
    pub data: serde_json::Map<String, Value>,

    /// The synthesized answer text
    pub answer: String,
}

/// One pipeline stage.
#[async_trait]
pub trait Node: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run this stage, consuming and returning the full state.
    async fn run(&self, state: AgentState) -> Result<AgentState>;
}

/// An ordered sequence of pipeline nodes.
pub struct Graph {
    nodes: Vec<Box<dyn Node>>,
}

impl Graph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node. Nodes run in the order they were added.
    pub fn add_node(mut self, node: impl Node + 'static) -> Self {
        self.nodes.push(Box::new(node));
        self
    }

    /// Run every node in sequence, threading the state through.
    pub async fn invoke(&self, mut state: AgentState) -> Result<AgentState> {
        for node in &self.nodes {
            tracing::debug!(node = node.name(), "running pipeline node");
            state = node
                .run(state)
                .await
                .with_context(|| format!("pipeline node '{}' failed", node.name()))?;
        }
        Ok(state)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
