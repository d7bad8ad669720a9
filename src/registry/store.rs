//! Host registry trait and in-memory implementation

use super::types::Host;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolves host identifiers to connection parameters
///
/// Object-safe so the client can hold `Arc<dyn HostRegistry>` without
/// propagating a generic parameter. Implementations must be `Send + Sync`.
#[async_trait]
pub trait HostRegistry: Send + Sync {
    /// Look up a host by its identifier
    ///
    /// # Errors
    ///
    /// Returns `Error::HostNotFound` when the identifier is unknown.
    async fn host_by_id(&self, host_id: &str) -> Result<Host>;
}

/// In-memory host registry backed by a map
#[derive(Debug, Default)]
pub struct InMemoryHostRegistry {
    hosts: Arc<RwLock<HashMap<String, Host>>>,
}

impl InMemoryHostRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a list of hosts
    pub fn from_hosts(hosts: Vec<Host>) -> Self {
        let map = hosts.into_iter().map(|h| (h.id.clone(), h)).collect();
        Self {
            hosts: Arc::new(RwLock::new(map)),
        }
    }

    /// Register a host, replacing any previous entry with the same id
    pub async fn insert(&self, host: Host) {
        let mut hosts = self.hosts.write().await;
        hosts.insert(host.id.clone(), host);
    }

    /// Remove a host by id, returning it if present
    pub async fn remove(&self, host_id: &str) -> Option<Host> {
        let mut hosts = self.hosts.write().await;
        hosts.remove(host_id)
    }

    /// All registered hosts, sorted by id
    pub async fn hosts(&self) -> Vec<Host> {
        let hosts = self.hosts.read().await;
        let mut all: Vec<Host> = hosts.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Number of registered hosts
    pub async fn len(&self) -> usize {
        self.hosts.read().await.len()
    }

    /// Check if the registry is empty
    pub async fn is_empty(&self) -> bool {
        self.hosts.read().await.is_empty()
    }
}

impl Clone for InMemoryHostRegistry {
    fn clone(&self) -> Self {
        Self {
            hosts: Arc::clone(&self.hosts),
        }
    }
}

#[async_trait]
impl HostRegistry for InMemoryHostRegistry {
    async fn host_by_id(&self, host_id: &str) -> Result<Host> {
        let hosts = self.hosts.read().await;
        hosts
            .get(host_id)
            .cloned()
            .ok_or_else(|| Error::host_not_found(host_id))
    }
}
