//! Token store module
//!
//! Persists and retrieves the last-known bearer token per host identifier.
//! A successful authentication overwrites the prior token unconditionally;
//! the client never holds a token beyond the duration of a single call.
//!
//! # Overview
//!
//! - `TokenStore` - the trait the client depends on
//! - `InMemoryTokenStore` - map-backed store for tests and embedding
//! - `FileTokenStore` - JSON-file-backed store with atomic writes

mod store;
mod types;

pub use store::{FileTokenStore, InMemoryTokenStore, TokenStore};
pub use types::StoredToken;

#[cfg(test)]
mod tests;
