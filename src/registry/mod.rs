//! Host registry module
//!
//! Resolves a host identifier to its connection parameters (base URL, port,
//! credentials). The `HostRegistry` trait is the seam the client depends on;
//! `InMemoryHostRegistry` is the shipped implementation, populated directly
//! or from a YAML hosts file.

mod loader;
mod store;
mod types;

pub use loader::{load_hosts_file, load_hosts_from_str};
pub use store::{HostRegistry, InMemoryHostRegistry};
pub use types::{Host, HostsFile};

#[cfg(test)]
mod tests;
