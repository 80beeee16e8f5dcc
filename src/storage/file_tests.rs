use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_get_missing_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path());

    assert!(store.get("chukfi_pages").await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_creates_root_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");
    let store = FileStore::new(&root);

    store.set("chukfi_pages", "[]").await.unwrap();

    assert!(root.join("chukfi_pages.json").exists());
    assert_eq!(store.get("chukfi_pages").await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_set_overwrites_whole_value() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path());

    store.set("chukfi_blog_posts", r#"[{"id":"a"},{"id":"b"}]"#).await.unwrap();
    store.set("chukfi_blog_posts", r#"[{"id":"b"}]"#).await.unwrap();

    assert_eq!(
        store.get("chukfi_blog_posts").await.unwrap().as_deref(),
        Some(r#"[{"id":"b"}]"#)
    );
}

#[tokio::test]
async fn test_rejects_path_traversal_keys() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path());

    for key in ["", "../escape", ".hidden", "a/b", "with space"] {
        let result = store.set(key, "[]").await;
        assert!(
            matches!(result, Err(StoreError::InvalidKey(_))),
            "key {key:?} should be rejected"
        );
    }
}

#[test]
fn test_root_accessor() {
    let store = FileStore::new("/tmp/chukfi-data");
    assert_eq!(store.root(), Path::new("/tmp/chukfi-data"));
}
