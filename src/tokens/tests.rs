//! Tests for the token store module

use super::*;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_in_memory_store_roundtrip() {
    let store = InMemoryTokenStore::new();
    assert!(store.token_by_id("h1").await.is_none());

    store.update_token("h1", "tok-1".to_string()).await;
    assert_eq!(store.token_by_id("h1").await, Some("tok-1".to_string()));
}

#[tokio::test]
async fn test_in_memory_store_overwrites() {
    let store = InMemoryTokenStore::new();

    store.update_token("h1", "old".to_string()).await;
    store.update_token("h1", "new".to_string()).await;

    assert_eq!(store.token_by_id("h1").await, Some("new".to_string()));
    assert_eq!(store.entries().await.len(), 1);
}

#[tokio::test]
async fn test_in_memory_store_scoped_per_host() {
    let store = InMemoryTokenStore::new();

    store.update_token("h1", "tok-1".to_string()).await;
    store.update_token("h2", "tok-2".to_string()).await;

    assert_eq!(store.token_by_id("h1").await, Some("tok-1".to_string()));
    assert_eq!(store.token_by_id("h2").await, Some("tok-2".to_string()));
}

#[tokio::test]
async fn test_in_memory_store_remove_and_clear() {
    let store = InMemoryTokenStore::new();
    store.update_token("h1", "tok-1".to_string()).await;
    store.update_token("h2", "tok-2".to_string()).await;

    let removed = store.remove("h1").await;
    assert_eq!(removed.unwrap().token, "tok-1");
    assert!(store.token_by_id("h1").await.is_none());

    store.clear().await;
    assert!(store.entries().await.is_empty());
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::new(&path);
    store.update_token("h1", "persisted".to_string()).await;

    let reloaded = FileTokenStore::from_file(&path).unwrap();
    assert_eq!(
        reloaded.token_by_id("h1").await,
        Some("persisted".to_string())
    );
}

#[tokio::test]
async fn test_file_store_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let store = FileTokenStore::from_file(&path).unwrap();
    assert!(store.token_by_id("h1").await.is_none());
}

#[test]
fn test_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileTokenStore::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse token file"));
}

#[tokio::test]
async fn test_file_store_no_temp_file_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::new(&path);
    store.update_token("h1", "tok".to_string()).await;

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_file_store_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::new(&path);
    store.update_token("h1", "tok-1".to_string()).await;
    store.update_token("h2", "tok-2".to_string()).await;

    store.remove("h1").await.unwrap();

    let reloaded = FileTokenStore::from_file(&path).unwrap();
    assert!(reloaded.token_by_id("h1").await.is_none());
    assert_eq!(reloaded.token_by_id("h2").await, Some("tok-2".to_string()));
}

#[tokio::test]
async fn test_file_store_clear_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::new(&path);
    store.update_token("h1", "tok-1".to_string()).await;
    store.clear().await.unwrap();

    let reloaded = FileTokenStore::from_file(&path).unwrap();
    assert!(reloaded.entries().await.is_empty());
}

#[tokio::test]
async fn test_entries_sorted_by_host() {
    let store = InMemoryTokenStore::new();
    store.update_token("zeta", "z".to_string()).await;
    store.update_token("alpha", "a".to_string()).await;

    let ids: Vec<String> = store.entries().await.into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["alpha".to_string(), "zeta".to_string()]);
}

#[test]
fn test_stored_token_records_issue_time() {
    let before = chrono::Utc::now();
    let token = StoredToken::new("tok");
    let after = chrono::Utc::now();

    assert_eq!(token.token, "tok");
    assert!(token.issued_at >= before && token.issued_at <= after);
}
