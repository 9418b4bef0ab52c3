use gatehouse_core::storage::KeyValueStore;
use gatehouse_infrastructure::{FileKeyValueStore, GatehousePaths};
use tempfile::TempDir;

#[tokio::test]
async fn test_values_survive_new_instance() {
    let temp_dir = TempDir::new().unwrap();
    let paths = GatehousePaths::new(Some(temp_dir.path().to_path_buf()));

    let store = FileKeyValueStore::new(&paths).unwrap();
    store
        .set("currentUser", r#"{"email":"a@b.com"}"#.to_string())
        .await
        .unwrap();

    // Simulates a process restart against the same data directory.
    let reopened = FileKeyValueStore::new(&paths).unwrap();
    assert_eq!(
        reopened.get("currentUser").await.unwrap().as_deref(),
        Some(r#"{"email":"a@b.com"}"#)
    );
    assert_eq!(reopened.path(), temp_dir.path().join("storage.toml"));
}

#[tokio::test]
async fn test_concurrent_writers_do_not_lose_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.toml");

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = FileKeyValueStore::with_path(path.clone());
        handles.push(tokio::spawn(async move {
            store.set(&format!("key{i}"), format!("value{i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let store = FileKeyValueStore::with_path(path);
    for i in 0..8 {
        assert_eq!(
            store.get(&format!("key{i}")).await.unwrap(),
            Some(format!("value{i}"))
        );
    }
}

#[tokio::test]
async fn test_values_with_quotes_and_newlines() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileKeyValueStore::with_path(temp_dir.path().join("storage.toml"));
    let tricky = "line one\n\"quoted\" = [not a table]\n".to_string();

    store.set("currentUser", tricky.clone()).await.unwrap();

    assert_eq!(store.get("currentUser").await.unwrap(), Some(tricky));
}
