//! Command handlers for CLI operations
//!
//! This module implements the handlers for the CLI commands:
//! - serve: assemble the provider, store, and checkpoint store, then run
//!   the HTTP facade
//! - headers: inspect the record store and print inferred header sets

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::agent::Agent;
use crate::checkpoint::{CheckpointStore, MemoryCheckpointStore};
use crate::config::Config;
use crate::llm::{ollama::OllamaProvider, openai::OpenAIProvider, LLMProvider};
use crate::server;
use crate::store::RecordStore;

/// Start the chat HTTP server.
pub async fn handle_serve(config: &Config) -> Result<()> {
    let llm = build_provider(config)?;
    tracing::info!(
        provider = llm.name(),
        local = llm.is_local(),
        "using LLM provider"
    );

    if !llm.check_health().await {
        tracing::warn!(
            provider = llm.name(),
            "LLM provider reports unhealthy, chat requests may fail"
        );
    }

    let store = RecordStore::new(&config.core.db_dir);
    tracing::info!(db_dir = %store.dir().display(), "record store ready");

    let checkpoints: Arc<dyn CheckpointStore> = Arc::new(MemoryCheckpointStore::new());
    let agent = Arc::new(Agent::new(llm, store, checkpoints));

    server::serve(&config.server, agent).await
}

/// Inspect the record store and print each file's stem and header set.
pub fn handle_headers(dir: Option<PathBuf>, config: &Config) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.core.db_dir.clone());
    let store = RecordStore::new(&dir);

    let sheets = store.headers().context("failed to inspect record store")?;

    if sheets.is_empty() {
        println!("No JSON files found in {}", dir.display());
        return Ok(());
    }

    for sheet in sheets {
        println!("{}: [{}]", sheet.name, sheet.headers.join(", "));
    }

    Ok(())
}

/// Build the configured LLM provider.
pub fn build_provider(config: &Config) -> Result<Arc<dyn LLMProvider>> {
    match config.llm.default_provider.as_str() {
        "openai" => Ok(Arc::new(OpenAIProvider::new(config.llm.openai.clone()))),
        "ollama" => Ok(Arc::new(OllamaProvider::new(
            config.llm.ollama.base_url.clone(),
            config.llm.ollama.model.clone(),
        ))),
        // Config validation rejects anything else before we get here
        other => anyhow::bail!("unknown LLM provider '{}'", other),
    }
}
