//! Token store implementations
//!
//! The file-backed store persists the host → token map as JSON with
//! write-to-temp-then-rename atomicity and saves on every update.

use super::types::StoredToken;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Persists and retrieves the last-known bearer token per host identifier
///
/// `update_token` is infallible at this boundary: a store that cannot
/// persist logs the problem and drops the write, which at worst costs one
/// extra authentication on the next request. Implementations must be
/// `Send + Sync`; the trait is object-safe for `Arc<dyn TokenStore>` use.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current token for a host, if any
    async fn token_by_id(&self, host_id: &str) -> Option<String>;

    /// Store a token for a host, overwriting any previous one
    async fn update_token(&self, host_id: &str, token: String);
}

/// In-memory token store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: Arc<RwLock<HashMap<String, StoredToken>>>,
}

impl InMemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the token for a host, returning it if present
    pub async fn remove(&self, host_id: &str) -> Option<StoredToken> {
        let mut tokens = self.tokens.write().await;
        tokens.remove(host_id)
    }

    /// Drop all cached tokens
    pub async fn clear(&self) {
        let mut tokens = self.tokens.write().await;
        tokens.clear();
    }

    /// All cached tokens, sorted by host id
    pub async fn entries(&self) -> Vec<(String, StoredToken)> {
        let tokens = self.tokens.read().await;
        let mut all: Vec<_> = tokens
            .iter()
            .map(|(id, t)| (id.clone(), t.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }
}

impl Clone for InMemoryTokenStore {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn token_by_id(&self, host_id: &str) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens.get(host_id).map(|t| t.token.clone())
    }

    async fn update_token(&self, host_id: &str, token: String) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(host_id.to_string(), StoredToken::new(token));
    }
}

/// File-backed token store
///
/// The whole map is rewritten on every update. Writes go to a temp file
/// first and are renamed into place so a crash never leaves a truncated
/// token file behind.
#[derive(Debug)]
pub struct FileTokenStore {
    /// Path to the token file
    path: PathBuf,
    /// Current tokens (cached)
    tokens: Arc<RwLock<HashMap<String, StoredToken>>>,
}

impl FileTokenStore {
    /// Create a store at the given path, starting empty
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store from a file, loading existing tokens if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let tokens = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                Error::token_store(format!("Failed to read token file: {e}"))
            })?;
            serde_json::from_str(&contents).map_err(|e| {
                Error::token_store(format!("Failed to parse token file: {e}"))
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            tokens: Arc::new(RwLock::new(tokens)),
        })
    }

    /// Save current tokens to the file
    pub async fn save(&self) -> Result<()> {
        let tokens = self.tokens.read().await;
        let contents = serde_json::to_string_pretty(&*tokens).map_err(|e| {
            Error::token_store(format!("Failed to serialize tokens: {e}"))
        })?;
        drop(tokens);

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::token_store(format!("Failed to write token file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::token_store(format!("Failed to rename token file: {e}")))?;

        Ok(())
    }

    /// Remove the token for a host and persist
    pub async fn remove(&self, host_id: &str) -> Result<Option<StoredToken>> {
        let removed = {
            let mut tokens = self.tokens.write().await;
            tokens.remove(host_id)
        };

        self.save().await?;
        Ok(removed)
    }

    /// Drop all cached tokens and persist
    pub async fn clear(&self) -> Result<()> {
        {
            let mut tokens = self.tokens.write().await;
            tokens.clear();
        }

        self.save().await
    }

    /// All cached tokens, sorted by host id
    pub async fn entries(&self) -> Vec<(String, StoredToken)> {
        let tokens = self.tokens.read().await;
        let mut all: Vec<_> = tokens
            .iter()
            .map(|(id, t)| (id.clone(), t.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Get the token file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clone for FileTokenStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn token_by_id(&self, host_id: &str) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens.get(host_id).map(|t| t.token.clone())
    }

    async fn update_token(&self, host_id: &str, token: String) {
        {
            let mut tokens = self.tokens.write().await;
            tokens.insert(host_id.to_string(), StoredToken::new(token));
        }

        if let Err(e) = self.save().await {
            warn!("Failed to persist token for '{host_id}', next request will re-authenticate: {e}");
        }
    }
}
