//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hostlink CLI
#[derive(Parser, Debug)]
#[command(name = "hostlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Hosts file (YAML)
    #[arg(short = 'H', long, global = true, default_value = "hosts.yaml")]
    pub hosts: PathBuf,

    /// Token cache file (JSON)
    #[arg(short, long, global = true, default_value = "hostlink-tokens.json")]
    pub tokens: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered hosts
    Hosts,

    /// Obtain a fresh token for a host and cache it
    Authenticate {
        /// Host identifier from the hosts file
        host_id: String,
    },

    /// Issue an authenticated request against a host
    Request {
        /// Host identifier from the hosts file
        host_id: String,

        /// Request path (e.g. /alerts)
        path: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Inline JSON body
        #[arg(short, long)]
        data: Option<String>,

        /// Override the retry budget for this request
        #[arg(long)]
        retries: Option<u32>,
    },

    /// Inspect or clear cached tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Token cache subcommands
#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Show cached tokens
    Show,

    /// Drop the cached token for a host (or all of them)
    Clear {
        /// Host identifier; clears every host when omitted
        host_id: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Human-readable output
    Pretty,
}
