//! Error types for hostlink
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! No error ever escapes as a panic; callers always see a typed variant.

use thiserror::Error;

/// The main error type for hostlink
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Registry Errors
    // ============================================================================
    #[error("Host '{host_id}' is not registered")]
    HostNotFound { host_id: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication against '{host_id}' failed with status {status}")]
    Auth {
        host_id: String,
        status: u16,
        body: String,
    },

    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Retry budget ({attempts}) exhausted, upstream kept responding 401")]
    RetriesExhausted { attempts: u32 },

    // ============================================================================
    // Token Store Errors
    // ============================================================================
    #[error("Token store error: {message}")]
    TokenStore { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a host-not-found error
    pub fn host_not_found(host_id: impl Into<String>) -> Self {
        Self::HostNotFound {
            host_id: host_id.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(host_id: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Auth {
            host_id: host_id.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an upstream status error
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a token store error
    pub fn token_store(message: impl Into<String>) -> Self {
        Self::TokenStore {
            message: message.into(),
        }
    }

    /// Check if this error came from the authorization layer
    /// (the upstream refused the credentials or the bearer token)
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Error::Auth { .. }
                | Error::RetriesExhausted { .. }
                | Error::UpstreamStatus { status: 401, .. }
        )
    }

    /// Check if this error is a transport-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

/// Result type alias for hostlink
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
