//! Authenticated request client module
//!
//! Issues JSON/HTTP requests against a named upstream host, obtaining and
//! caching a bearer token and transparently re-authenticating and retrying
//! on authorization failure.
//!
//! # Features
//!
//! - **Lazy Authentication**: a token is fetched only when none is cached
//! - **Bounded Retry**: 401 responses trigger re-auth + retry, up to a budget
//! - **Typed Failures**: every outcome is a `Result`, nothing ever panics

mod api;

pub use api::{ApiClient, ClientConfig, ClientConfigBuilder, RequestSpec};
