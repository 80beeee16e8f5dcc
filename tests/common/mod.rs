//! Common test utilities

use chukfi_store::{
    BlogPost, ChangeNotifier, EntityCache, FileStore, KeyValueStore, Page, TrashAggregator,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Caches and trash over a [`FileStore`] rooted at one directory.
pub struct TestStore {
    pub pages: EntityCache<Page>,
    pub posts: EntityCache<BlogPost>,
    pub trash: TrashAggregator,
    pub notifier: ChangeNotifier,
}

/// Open the default-keyed caches over `data_dir`.
pub fn open_store(data_dir: &Path) -> TestStore {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));
    let notifier = ChangeNotifier::new();
    let pages = EntityCache::<Page>::with_default_key(Arc::clone(&store), notifier.clone());
    let posts = EntityCache::<BlogPost>::with_default_key(store, notifier.clone());
    let trash = TrashAggregator::new()
        .register(pages.clone())
        .register(posts.clone());
    TestStore {
        pages,
        posts,
        trash,
        notifier,
    }
}

/// Write a stored array the way the dashboard would have left it.
#[allow(dead_code)] // Not every integration test seeds raw JSON
pub fn seed_key(data_dir: &Path, key: &str, json: &str) {
    std::fs::create_dir_all(data_dir).expect("Failed to create data dir");
    std::fs::write(data_dir.join(format!("{key}.json")), json).expect("Failed to seed key");
}

/// Read a stored array back as raw JSON.
#[allow(dead_code)]
pub fn read_key(data_dir: &Path, key: &str) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.join(format!("{key}.json")))
        .expect("Failed to read key");
    serde_json::from_str(&raw).expect("Stored key is not JSON")
}
