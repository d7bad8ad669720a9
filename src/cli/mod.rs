//! CLI module
//!
//! Command-line interface for issuing authenticated requests against
//! registered hosts.
//!
//! # Commands
//!
//! - `hosts` - List registered hosts
//! - `authenticate` - Obtain and cache a token for a host
//! - `request` - Issue an authenticated request
//! - `token` - Inspect or clear cached tokens

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, TokenAction};
pub use runner::Runner;
