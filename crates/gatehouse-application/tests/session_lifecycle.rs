use std::sync::Arc;

use chrono::Utc;
use gatehouse_application::SessionStore;
use gatehouse_core::Session;
use gatehouse_core::auth::{AuthError, SimulatedAuthenticator};
use gatehouse_core::config::AppConfig;
use gatehouse_core::storage::{InMemoryKeyValueStore, KeyValueStore};
use gatehouse_infrastructure::FileKeyValueStore;
use tempfile::TempDir;

fn memory_store(storage: &InMemoryKeyValueStore) -> SessionStore {
    SessionStore::new(
        Arc::new(storage.clone()),
        Arc::new(SimulatedAuthenticator::default()),
    )
}

#[tokio::test(start_paused = true)]
async fn test_login_resolves_after_simulated_latency() {
    let storage = InMemoryKeyValueStore::new();
    let store = memory_store(&storage);
    let called_at = Utc::now();
    let started = tokio::time::Instant::now();

    let session = store.login("a@b.com", "secret1").await.unwrap();

    assert!(started.elapsed() >= std::time::Duration::from_millis(1000));
    assert_eq!(session.email, "a@b.com");
    assert!(session.login_time >= called_at);

    // The durable slot holds the serialized record.
    let raw = storage.get("currentUser").await.unwrap().unwrap();
    assert_eq!(Session::from_json(&raw).unwrap(), session);
}

#[tokio::test(start_paused = true)]
async fn test_rejections_leave_slot_absent() {
    let storage = InMemoryKeyValueStore::new();
    let store = memory_store(&storage);

    for (email, password) in [("a@b.com", "short"), ("", "secret1"), ("a@b.com", "")] {
        let err = store.login(email, password).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    assert_eq!(storage.get("currentUser").await.unwrap(), None);
    assert!(store.current_user().await.is_none());
}

#[tokio::test]
async fn test_logout_without_session_is_noop() {
    let storage = InMemoryKeyValueStore::new();
    let store = memory_store(&storage);

    store.logout().await.unwrap();
    store.logout().await.unwrap();

    assert_eq!(storage.get("currentUser").await.unwrap(), None);
    assert!(!store.is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn test_reload_restores_session() {
    let storage = InMemoryKeyValueStore::new();
    let session = memory_store(&storage)
        .login("a@b.com", "secret1")
        .await
        .unwrap();

    // A fresh store has an empty cache, like a reloaded page.
    let reloaded = memory_store(&storage);
    let restored = reloaded.current_user().await.unwrap();

    assert_eq!(restored.email, session.email);
    assert_eq!(restored.login_time, session.login_time);
}

#[tokio::test(start_paused = true)]
async fn test_logout_right_after_login() {
    let storage = InMemoryKeyValueStore::new();
    let store = memory_store(&storage);
    store.login("a@b.com", "secret1").await.unwrap();
    assert!(store.is_authenticated().await);

    store.logout().await.unwrap();

    assert!(!store.is_authenticated().await);
    assert!(store.current_user().await.is_none());
    assert!(!memory_store(&storage).is_authenticated().await);
}

#[tokio::test]
async fn test_malformed_slot_reads_as_absent() {
    let storage = InMemoryKeyValueStore::new();
    storage
        .set("currentUser", "<<<garbage>>>".to_string())
        .await
        .unwrap();

    let store = memory_store(&storage);

    assert!(store.current_user().await.is_none());
    assert!(!store.is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn test_file_backed_session_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.toml");
    let config = AppConfig::default();

    let first = SessionStore::from_config(&config, Arc::new(FileKeyValueStore::with_path(path.clone())));
    let session = first.login("a@b.com", "secret1").await.unwrap();

    let second = SessionStore::from_config(&config, Arc::new(FileKeyValueStore::with_path(path.clone())));
    assert_eq!(second.current_user().await, Some(session));

    second.logout().await.unwrap();
    let third = SessionStore::from_config(&config, Arc::new(FileKeyValueStore::with_path(path)));
    assert!(!third.is_authenticated().await);
}

#[tokio::test]
async fn test_file_backed_corrupt_record_is_cleared() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.toml");
    let storage = FileKeyValueStore::with_path(path.clone());
    storage
        .set("currentUser", "{\"email\": 42}".to_string())
        .await
        .unwrap();

    let store = SessionStore::from_config(&AppConfig::default(), Arc::new(storage.clone()));

    assert!(store.current_user().await.is_none());
    assert_eq!(storage.get("currentUser").await.unwrap(), None);
}
