//! Permanent removal from the trash.
use super::retention::is_expired;
use super::soft_delete::Restorable;
use crate::cache::EntityCache;
use crate::entity::Entity;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Caches whose trashed records can be removed for good.
#[async_trait]
pub trait Purgeable: Restorable {
    /// Remove one trashed record. `Ok(false)` when no record has that id.
    ///
    /// Live records are refused with [`StoreError::NotDeleted`]: only records
    /// that went through the trash can be purged.
    async fn purge(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove every trashed record in a single write. Returns how many went.
    async fn purge_all(&self) -> Result<usize, StoreError>;

    /// Remove trashed records older than the retention window, in a single write.
    async fn purge_expired(
        &self,
        now: DateTime<Utc>,
        retention_days: u32,
    ) -> Result<usize, StoreError>;
}

impl<E: Entity> EntityCache<E> {
    /// Drop the trashed records matching `doomed`, committing once if any went.
    async fn remove_trashed<F>(&self, doomed: F) -> Result<usize, StoreError>
    where
        F: Fn(&E) -> bool + Send,
    {
        let _guard = self.lock().await;
        let records = self.read_records().await?;
        let before = records.len();

        let kept: Vec<E> = records
            .into_iter()
            .filter(|r| !(r.is_deleted() && doomed(r)))
            .collect();
        let removed = before.saturating_sub(kept.len());
        if removed == 0 {
            debug!(kind = %E::KIND, "Nothing to purge");
            return Ok(0);
        }

        self.commit(&kept).await?;
        info!(kind = %E::KIND, removed, "Purged trashed records");
        Ok(removed)
    }
}

#[async_trait]
impl<E: Entity> Purgeable for EntityCache<E> {
    async fn purge(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock().await;
        let mut records = self.read_records().await?;

        let Some(index) = records.iter().position(|r| r.id() == id) else {
            debug!(kind = %E::KIND, id, "Purge of unknown record ignored");
            return Ok(false);
        };
        if records.get(index).is_some_and(|r| !r.is_deleted()) {
            warn!(kind = %E::KIND, id, "Refusing to purge a live record");
            return Err(StoreError::NotDeleted {
                kind: E::KIND,
                id: id.to_string(),
            });
        }

        records.remove(index);
        self.commit(&records).await?;
        info!(kind = %E::KIND, id, "Permanently deleted record");
        Ok(true)
    }

    async fn purge_all(&self) -> Result<usize, StoreError> {
        self.remove_trashed(|_| true).await
    }

    async fn purge_expired(
        &self,
        now: DateTime<Utc>,
        retention_days: u32,
    ) -> Result<usize, StoreError> {
        self.remove_trashed(move |r| {
            r.deleted_at()
                .is_some_and(|at| is_expired(at, now, retention_days))
        })
        .await
    }
}
