//! Per-kind entity cache over the key-value store.
//!
//! Discipline is read full, mutate, write full. A cache serializes its own
//! read-modify-write cycles, so no other user of the same cache observes a
//! half-applied operation. Clones share that lock, so build one cache per key
//! and hand out clones. Separate processes sharing the storage are not
//! coordinated: the last writer wins.

use crate::entity::Entity;
use crate::error::StoreError;
use crate::events::ChangeNotifier;
use crate::storage::KeyValueStore;
use crate::utils::now_iso;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Cache for one entity kind, persisted under a single storage key.
pub struct EntityCache<E: Entity> {
    store: Arc<dyn KeyValueStore>,
    notifier: ChangeNotifier,
    key: String,
    write_lock: Arc<Mutex<()>>,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityCache<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: self.notifier.clone(),
            key: self.key.clone(),
            write_lock: Arc::clone(&self.write_lock),
            _kind: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for EntityCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("kind", &E::KIND)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> EntityCache<E> {
    /// Cache stored under `key`.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        notifier: ChangeNotifier,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            key: key.into(),
            write_lock: Arc::new(Mutex::new(())),
            _kind: PhantomData,
        }
    }

    /// Cache stored under the kind's default key.
    #[must_use]
    pub fn with_default_key(store: Arc<dyn KeyValueStore>, notifier: ChangeNotifier) -> Self {
        Self::new(store, notifier, E::KIND.default_storage_key())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Full stored array, after kind invariants are repaired.
    ///
    /// Never fails: a missing key reads as empty, and an unreadable array is
    /// logged and treated as empty. A repaired array (e.g. a synthesized home
    /// page) is persisted only when the stored value was missing or parsed, so
    /// an unreadable array is never overwritten.
    pub async fn load(&self) -> Vec<E> {
        let _guard = self.lock().await;
        let (mut records, readable) = match self.read_records().await {
            Ok(records) => (records, true),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Treating unreadable cache as empty");
                (Vec::new(), false)
            }
        };

        if E::ensure_invariants(&mut records, &now_iso()) {
            if readable {
                info!(kind = %E::KIND, "Repaired cache invariants");
                if let Err(e) = self.write_records(&records).await {
                    warn!(key = %self.key, error = %e, "Failed to persist repaired cache");
                }
            } else {
                warn!(key = %self.key, "Leaving unreadable cache untouched");
            }
        }
        records
    }

    /// Live records in the kind's display order.
    pub async fn load_active(&self) -> Vec<E> {
        let mut active: Vec<E> = self
            .load()
            .await
            .into_iter()
            .filter(|r| !r.is_deleted())
            .collect();
        active.sort_by(E::active_order);
        active
    }

    /// Soft-deleted records, most recently deleted first.
    pub async fn load_deleted(&self) -> Vec<E> {
        let mut deleted: Vec<E> = self
            .load()
            .await
            .into_iter()
            .filter(|r| r.is_deleted())
            .collect();
        deleted.sort_by(|a, b| crate::entity::newest_first(a.deleted_at(), b.deleted_at()));
        deleted
    }

    /// Look up one record by id, live or deleted.
    pub async fn find(&self, id: &str) -> Option<E> {
        self.load().await.into_iter().find(|r| r.id() == id)
    }

    /// Overwrite the whole array, then notify subscribers.
    pub async fn save(&self, records: &[E]) -> Result<(), StoreError> {
        let _guard = self.lock().await;
        self.commit(records).await?;
        debug!(kind = %E::KIND, count = records.len(), "Saved cache");
        Ok(())
    }

    /// Whether no live record other than `except_id` uses `slug`.
    ///
    /// Slugs are compared after normalisation, so `About Us` clashes with
    /// `about-us`. Advisory only: writes never check this.
    pub async fn slug_available(&self, slug: &str, except_id: Option<&str>) -> bool {
        let wanted = slug::slugify(slug);
        !self.load().await.iter().any(|r| {
            !r.is_deleted() && Some(r.id()) != except_id && slug::slugify(r.slug()) == wanted
        })
    }

    /// Serialize read-modify-write cycles on this cache.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Raw stored array. Unlike [`load`](Self::load), an unreadable array is an error.
    pub(crate) async fn read_records(&self) -> Result<Vec<E>, StoreError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::CorruptCache {
            key: self.key.clone(),
            source,
        })
    }

    /// Write the full array without notifying.
    pub(crate) async fn write_records(&self, records: &[E]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(&self.key, &raw).await
    }

    /// Write, then notify. The write completes before any subscriber hears of it.
    pub(crate) async fn commit(&self, records: &[E]) -> Result<(), StoreError> {
        self.write_records(records).await?;
        self.notifier.notify(E::KIND);
        Ok(())
    }
}
