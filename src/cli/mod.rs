//! CLI module for the account service
//!
//! Provides the `serve` subcommand running the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// Account service - user accounts with credential and token authentication
#[derive(Parser)]
#[command(name = "account-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
