//! CLI interface for Diya
//!
//! This module provides the command-line interface using clap's derive
//! API. The binary has two jobs: serve the chat endpoint, and inspect
//! the record store's header sets for development.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Diya chat service
///
/// Answers natural-language questions about company record sheets by
/// routing each query through an LLM over the JSON record store.
#[derive(Parser, Debug)]
#[command(name = "diya")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the chat HTTP server
    Serve,

    /// Print each record store file's stem and inferred header set
    Headers {
        /// Directory to inspect (defaults to the configured db_dir)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}
