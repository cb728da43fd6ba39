//! CLI module for the model catalog API
//!
//! - `serve`: run the HTTP API (default)
//! - `fetch`: query the catalog once and print the result

pub mod fetch;
pub mod serve;

use clap::{Parser, Subcommand};

/// Model Catalog API - cached, queryable view of the Ollama model library
#[derive(Parser)]
#[command(name = "model-catalog-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Fetch the catalog once and print it as JSON
    Fetch(fetch::FetchArgs),
}
