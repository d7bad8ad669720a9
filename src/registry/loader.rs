//! YAML parser for hosts files
//!
//! Parses and validates hosts YAML files into a registry.

use super::store::InMemoryHostRegistry;
use super::types::{Host, HostsFile};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a hosts file and build a registry from it
///
/// # Examples
///
/// ```ignore
/// let registry = load_hosts_file("hosts.yaml")?;
/// ```
pub fn load_hosts_file(path: impl AsRef<Path>) -> Result<InMemoryHostRegistry> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read hosts file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_hosts_from_str(&content)
}

/// Load hosts from a YAML string and build a registry
pub fn load_hosts_from_str(yaml: &str) -> Result<InMemoryHostRegistry> {
    let file: HostsFile = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse hosts YAML: {e}")))?;

    validate_hosts(&file.hosts)?;
    Ok(InMemoryHostRegistry::from_hosts(file.hosts))
}

/// Validate a list of host definitions
fn validate_hosts(hosts: &[Host]) -> Result<()> {
    let ids: HashSet<_> = hosts.iter().map(|h| &h.id).collect();
    if ids.len() != hosts.len() {
        return Err(Error::config("Duplicate host ids found"));
    }

    for host in hosts {
        validate_host(host)?;
    }

    Ok(())
}

/// Validate a single host definition
fn validate_host(host: &Host) -> Result<()> {
    if host.id.is_empty() {
        return Err(Error::config("Host id cannot be empty"));
    }

    if host.url.is_empty() {
        return Err(Error::config(format!(
            "Host '{}' url cannot be empty",
            host.id
        )));
    }

    // The base URL must parse on its own; the port is appended per request
    url::Url::parse(&host.url).map_err(|e| {
        Error::config(format!("Host '{}' has an invalid url: {}", host.id, e))
    })?;

    if host.username.is_empty() {
        return Err(Error::config(format!(
            "Host '{}' username cannot be empty",
            host.id
        )));
    }

    Ok(())
}
