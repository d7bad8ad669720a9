//! Tests for the registry module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;

fn sample_host(id: &str) -> Host {
    Host {
        id: id.to_string(),
        url: "https://api.example.com".to_string(),
        port: 55000,
        username: "admin".to_string(),
        password: "secret".to_string(),
    }
}

#[test]
fn test_base_endpoint_strips_trailing_slash() {
    let mut host = sample_host("h1");
    host.url = "https://api.example.com/".to_string();
    assert_eq!(host.base_endpoint(), "https://api.example.com:55000");
}

#[test]
fn test_endpoint_normalizes_joining_slash() {
    let host = sample_host("h1");
    assert_eq!(
        host.endpoint("/alerts"),
        "https://api.example.com:55000/alerts"
    );
    assert_eq!(
        host.endpoint("alerts"),
        "https://api.example.com:55000/alerts"
    );
}

#[test]
fn test_host_debug_redacts_password() {
    let host = sample_host("h1");
    let debug = format!("{host:?}");
    assert!(debug.contains("h1"));
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("secret"));
}

#[tokio::test]
async fn test_registry_lookup() {
    let registry = InMemoryHostRegistry::from_hosts(vec![sample_host("h1"), sample_host("h2")]);

    let host = registry.host_by_id("h1").await.unwrap();
    assert_eq!(host.id, "h1");
    assert_eq!(registry.len().await, 2);
}

#[tokio::test]
async fn test_registry_unknown_host() {
    let registry = InMemoryHostRegistry::new();
    let result = registry.host_by_id("nope").await;

    assert!(matches!(
        result.unwrap_err(),
        Error::HostNotFound { host_id } if host_id == "nope"
    ));
}

#[tokio::test]
async fn test_registry_insert_replaces() {
    let registry = InMemoryHostRegistry::new();
    registry.insert(sample_host("h1")).await;

    let mut updated = sample_host("h1");
    updated.port = 9200;
    registry.insert(updated).await;

    assert_eq!(registry.len().await, 1);
    assert_eq!(registry.host_by_id("h1").await.unwrap().port, 9200);
}

#[tokio::test]
async fn test_registry_remove() {
    let registry = InMemoryHostRegistry::from_hosts(vec![sample_host("h1")]);

    assert!(registry.remove("h1").await.is_some());
    assert!(registry.remove("h1").await.is_none());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_registry_hosts_sorted() {
    let registry = InMemoryHostRegistry::from_hosts(vec![
        sample_host("beta"),
        sample_host("alpha"),
    ]);

    let ids: Vec<String> = registry.hosts().await.into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["alpha".to_string(), "beta".to_string()]);
}

#[tokio::test]
async fn test_load_hosts_from_str() {
    let yaml = r#"
hosts:
  - id: h1
    url: https://api.example.com
    port: 55000
    username: admin
    password: secret
  - id: h2
    url: http://localhost
    port: 8080
    username: dev
    password: devpass
"#;

    let registry = load_hosts_from_str(yaml).unwrap();
    assert_eq!(registry.len().await, 2);

    let h2 = registry.host_by_id("h2").await.unwrap();
    assert_eq!(h2.base_endpoint(), "http://localhost:8080");
}

#[test]
fn test_load_hosts_rejects_duplicate_ids() {
    let yaml = r#"
hosts:
  - id: h1
    url: https://api.example.com
    port: 55000
    username: admin
    password: one
  - id: h1
    url: https://other.example.com
    port: 55000
    username: admin
    password: two
"#;

    let err = load_hosts_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("Duplicate host ids"));
}

#[test]
fn test_load_hosts_rejects_invalid_url() {
    let yaml = r#"
hosts:
  - id: h1
    url: "not a url"
    port: 55000
    username: admin
    password: secret
"#;

    let err = load_hosts_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("invalid url"));
}

#[test]
fn test_load_hosts_rejects_empty_username() {
    let yaml = r#"
hosts:
  - id: h1
    url: https://api.example.com
    port: 55000
    username: ""
    password: secret
"#;

    let err = load_hosts_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("username"));
}

#[test]
fn test_load_hosts_rejects_malformed_yaml() {
    let result = load_hosts_from_str("hosts: [not, closed");
    assert!(result.is_err());
}

#[test]
fn test_load_hosts_file_missing() {
    let result = load_hosts_file("/nonexistent/hosts.yaml");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read hosts file"));
}

#[tokio::test]
async fn test_load_hosts_file_roundtrip() {
    let yaml = r#"
hosts:
  - id: h1
    url: https://api.example.com
    port: 55000
    username: admin
    password: secret
"#;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.yaml");
    std::fs::write(&path, yaml).unwrap();

    let registry = load_hosts_file(&path).unwrap();
    assert_eq!(registry.host_by_id("h1").await.unwrap().port, 55000);
}
