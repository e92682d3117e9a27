//! CLI module for Anime Gateway
//!
//! `serve` is the only mode and runs when no subcommand is given.

pub mod serve;

use clap::{Parser, Subcommand};

/// Anime Gateway - cached anime metadata over HTTP
#[derive(Parser)]
#[command(name = "anime-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway
    Serve(serve::ServeArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve(serve::ServeArgs::default())
    }
}
