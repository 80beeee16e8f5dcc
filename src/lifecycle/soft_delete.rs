//! Soft delete and restore.
use crate::cache::EntityCache;
use crate::entity::Entity;
use crate::error::StoreError;
use crate::utils::now_iso;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Caches whose records can be moved to the trash.
#[async_trait]
pub trait SoftDeletable {
    type Record;

    /// Mark the record deleted by setting its `deletedAt` timestamp.
    ///
    /// Returns the record as stored afterwards, or `None` when no record has
    /// that id. A record already in the trash keeps its original timestamp.
    async fn soft_delete(&self, id: &str) -> Result<Option<Self::Record>, StoreError>;
}

/// Caches whose trashed records can be brought back.
#[async_trait]
pub trait Restorable: SoftDeletable {
    /// Remove the `deletedAt` field. Restoring a live or missing record is a no-op.
    async fn restore(&self, id: &str) -> Result<Option<Self::Record>, StoreError>;
}

#[async_trait]
impl<E: Entity> SoftDeletable for EntityCache<E> {
    type Record = E;

    async fn soft_delete(&self, id: &str) -> Result<Option<E>, StoreError> {
        let _guard = self.lock().await;
        let mut records = self.read_records().await?;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            if E::is_protected_id(id) {
                warn!(kind = %E::KIND, id, "Refusing to delete protected record");
                return Err(StoreError::ProtectedEntity {
                    kind: E::KIND,
                    id: id.to_string(),
                });
            }
            debug!(kind = %E::KIND, id, "Soft delete of unknown record ignored");
            return Ok(None);
        };
        if record.is_protected() {
            warn!(kind = %E::KIND, id, "Refusing to delete protected record");
            return Err(StoreError::ProtectedEntity {
                kind: E::KIND,
                id: id.to_string(),
            });
        }
        if record.is_deleted() {
            debug!(kind = %E::KIND, id, "Record already in trash");
            return Ok(Some(record.clone()));
        }

        record.set_deleted_at(Some(now_iso()));
        let deleted = record.clone();
        self.commit(&records).await?;
        info!(kind = %E::KIND, id, "Moved record to trash");
        Ok(Some(deleted))
    }
}

#[async_trait]
impl<E: Entity> Restorable for EntityCache<E> {
    async fn restore(&self, id: &str) -> Result<Option<E>, StoreError> {
        let _guard = self.lock().await;
        let mut records = self.read_records().await?;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            debug!(kind = %E::KIND, id, "Restore of unknown record ignored");
            return Ok(None);
        };
        if !record.is_deleted() {
            debug!(kind = %E::KIND, id, "Record already live");
            return Ok(Some(record.clone()));
        }

        record.set_deleted_at(None);
        let restored = record.clone();
        self.commit(&records).await?;
        info!(kind = %E::KIND, id, "Restored record from trash");
        Ok(Some(restored))
    }
}
