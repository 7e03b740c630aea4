//! Sheet loader node
//!
//! Reads the backing file of each selected sheet into the state. Sheets
//! without a backing file are skipped; the data map is fully replaced on
//! every run so stale entries from a previous invocation cannot leak in.

use super::{AgentState, Node};
use crate::store::RecordStore;
use anyhow::Result;
use async_trait::async_trait;

pub struct SheetLoader {
    store: RecordStore,
}

impl SheetLoader {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Node for SheetLoader {
    fn name(&self) -> &str {
        "load"
    }

    async fn run(&self, mut state: AgentState) -> Result<AgentState> {
        let mut data = serde_json::Map::new();

        for sheet in &state.relevant_sheets {
            match self.store.load(sheet)? {
                Some(value) => {
                    data.insert(sheet.clone(), value);
                }
                None => {
                    tracing::debug!(sheet = %sheet, "no backing file for sheet, skipping");
                }
            }
        }

        tracing::info!(loaded = data.len(), "loaded sheet data");
        state.data = data;

        Ok(state)
    }
}
