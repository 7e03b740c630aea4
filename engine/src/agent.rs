//! Conversation runner
//!
//! Wires the three pipeline nodes into a graph and runs one invocation
//! per chat message: acquire the thread's lock, resume (or start) its
//! state, run select / load / answer, persist, return the answer text.

use crate::checkpoint::CheckpointStore;
use crate::llm::LLMProvider;
use crate::pipeline::{AnswerNode, Graph, SheetLoader, SheetSelector};
use crate::store::RecordStore;
use anyhow::Result;
use std::sync::Arc;

pub struct Agent {
    graph: Graph,
    checkpoints: Arc<dyn CheckpointStore>,
}

impl Agent {
    /// Build the fixed select / load / answer graph over the given
    /// provider and record store.
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        store: RecordStore,
        checkpoints: Arc<dyn CheckpointStore>,
    ) -> Self {
        let graph = Graph::new()
            .add_node(SheetSelector::new(Arc::clone(&llm)))
            .add_node(SheetLoader::new(store))
            .add_node(AnswerNode::new(llm));

        Self { graph, checkpoints }
    }

    /// Handle one chat message for a thread and return the answer text.
    ///
    /// The per-thread lock is held for the whole run, so concurrent
    /// requests on one thread serialize. Every run overwrites all state
    /// fields; the checkpoint preserves the last completed state between
    /// calls.
    pub async fn invoke(&self, thread_id: &str, message: &str) -> Result<String> {
        let _guard = self.checkpoints.lock(thread_id).await;

        let mut state = self.checkpoints.get(thread_id).await.unwrap_or_default();
        state.query = message.to_string();

        tracing::info!(thread_id, "running chat pipeline");
        let final_state = self.graph.invoke(state).await?;

        let answer = final_state.answer.clone();
        self.checkpoints.put(thread_id, final_state).await;

        Ok(answer)
    }
}
