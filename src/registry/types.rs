//! Host definition types
//!
//! These types represent one registered upstream host and the YAML document
//! that declares a set of them.

use serde::{Deserialize, Serialize};

/// Connection parameters for one upstream API host
///
/// Immutable once resolved for a request; owned by the registry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Unique host identifier (e.g., "production")
    pub id: String,

    /// Base URL including scheme (e.g., "https://api.example.com")
    pub url: String,

    /// API port
    pub port: u16,

    /// Username for the authenticate endpoint
    pub username: String,

    /// Password for the authenticate endpoint
    pub password: String,
}

impl Host {
    /// Base endpoint for requests against this host: `{url}:{port}`
    /// with any trailing slash on the URL stripped first.
    pub fn base_endpoint(&self) -> String {
        format!("{}:{}", self.url.trim_end_matches('/'), self.port)
    }

    /// Full URL for a path on this host, normalizing the joining slash
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_endpoint(), path.trim_start_matches('/'))
    }
}

// Credentials must never end up in logs, so Debug redacts the password.
impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Top-level structure of a YAML hosts file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsFile {
    /// Registered hosts
    #[serde(default)]
    pub hosts: Vec<Host>,
}
