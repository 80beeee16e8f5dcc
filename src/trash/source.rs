use super::TrashItem;
use crate::cache::EntityCache;
use crate::entity::{Entity, EntityKind};
use crate::error::StoreError;
use crate::lifecycle::{Purgeable, Restorable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Per-kind trash operations, looked up by kind in the aggregator's table.
#[async_trait]
pub trait TrashSource: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Every trashed record of this kind. Errors if the stored array is unreadable.
    async fn trashed(&self) -> Result<Vec<TrashItem>, StoreError>;

    /// `true` if the record exists and is now live.
    async fn restore_id(&self, id: &str) -> Result<bool, StoreError>;

    /// `true` if a record was removed.
    async fn purge_id(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove every trashed record of this kind.
    async fn empty_trash(&self) -> Result<usize, StoreError>;

    /// Remove trashed records past the retention window.
    async fn expire(&self, now: DateTime<Utc>, retention_days: u32) -> Result<usize, StoreError>;
}

#[async_trait]
impl<E: Entity> TrashSource for EntityCache<E> {
    fn kind(&self) -> EntityKind {
        E::KIND
    }

    async fn trashed(&self) -> Result<Vec<TrashItem>, StoreError> {
        Ok(self
            .read_records()
            .await?
            .into_iter()
            .filter(|r| r.is_deleted())
            .map(Entity::into_trash_item)
            .collect())
    }

    async fn restore_id(&self, id: &str) -> Result<bool, StoreError> {
        Ok(Restorable::restore(self, id).await?.is_some())
    }

    async fn purge_id(&self, id: &str) -> Result<bool, StoreError> {
        Purgeable::purge(self, id).await
    }

    async fn empty_trash(&self) -> Result<usize, StoreError> {
        Purgeable::purge_all(self).await
    }

    async fn expire(&self, now: DateTime<Utc>, retention_days: u32) -> Result<usize, StoreError> {
        Purgeable::purge_expired(self, now, retention_days).await
    }
}
