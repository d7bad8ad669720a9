//! # hostlink
//!
//! Client for registered upstream API hosts with per-host bearer token
//! caching and transparent retry on authorization failure.
//!
//! ## Features
//!
//! - **Host Registry**: resolve a host id to base URL, port and credentials
//! - **Token Cache**: one bearer token per host, in memory or on disk
//! - **Lazy Authentication**: tokens are fetched only when none is cached
//! - **Bounded Retry**: a 401 refreshes the token and replays the request,
//!   up to a configurable budget
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostlink::{ApiClient, InMemoryTokenStore, Result};
//! use hostlink::registry::load_hosts_file;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let registry = load_hosts_file("hosts.yaml")?;
//!     let tokens = InMemoryTokenStore::new();
//!     let client = ApiClient::new(Arc::new(registry), Arc::new(tokens));
//!
//!     // Authenticates lazily, retries once per 401 up to the budget
//!     let alerts = client.get("production", "/alerts").await?;
//!     println!("{alerts}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      ApiClient                       │
//! │  authenticate(host) → token    execute(spec) → body  │
//! └──────────────────────────────────────────────────────┘
//!            │                              │
//! ┌──────────┴──────────┐      ┌────────────┴───────────┐
//! │    HostRegistry     │      │       TokenStore       │
//! ├─────────────────────┤      ├────────────────────────┤
//! │ InMemory            │      │ InMemory               │
//! │ YAML hosts file     │      │ JSON file (atomic)     │
//! └─────────────────────┘      └────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for hostlink
pub mod error;

/// Common types and type aliases
pub mod types;

/// Host registry: id → connection parameters
pub mod registry;

/// Token store: id → cached bearer token
pub mod tokens;

/// Authenticated request client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{ApiClient, ClientConfig, RequestSpec};
pub use error::{Error, Result};
pub use registry::{load_hosts_file, load_hosts_from_str, Host, HostRegistry, InMemoryHostRegistry};
pub use tokens::{FileTokenStore, InMemoryTokenStore, TokenStore};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
