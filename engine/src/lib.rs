//! Diya Engine Library
//!
//! Answers natural-language questions about fixed-schema business records
//! (checklists, delegations, purchase/sales logs, production orders) by
//! running a three-stage pipeline: select relevant record sheets, load
//! their JSON files, and synthesize a final answer with an LLM.
//! Used by both the main binary and integration tests.

/// Conversation runner module
pub mod agent;

/// The nine record sheets and the fixed model instruction
pub mod catalog;

/// Conversation-state checkpoint store
pub mod checkpoint;

/// CLI interface module
pub mod cli;

/// Configuration management module
pub mod config;

/// Error types
pub mod error;

/// Command handlers module
pub mod handlers;

/// LLM provider abstraction layer
pub mod llm;

/// Select / load / answer pipeline
pub mod pipeline;

/// HTTP chat facade
pub mod server;

/// JSON record store access
pub mod store;

/// Telemetry and Observability
pub mod telemetry;
