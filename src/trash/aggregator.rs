use super::{TrashFilter, TrashItem, TrashSource};
use crate::cache::EntityCache;
use crate::entity::{newest_first, BlogPost, EntityKind, Page};
use crate::error::StoreError;
use crate::events::ChangeNotifier;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a bulk purge across kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeSummary {
    /// Records removed, per kind that was processed
    pub purged: BTreeMap<EntityKind, usize>,
    /// Kinds whose cache could not be read or written
    pub skipped: Vec<EntityKind>,
}

impl PurgeSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.purged.values().sum()
    }
}

/// Trash view over every registered entity kind.
#[derive(Clone, Default)]
pub struct TrashAggregator {
    sources: BTreeMap<EntityKind, Arc<dyn TrashSource>>,
}

impl std::fmt::Debug for TrashAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrashAggregator")
            .field("kinds", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TrashAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages and blog posts under their default storage keys.
    #[must_use]
    pub fn with_default_kinds(store: &Arc<dyn KeyValueStore>, notifier: &ChangeNotifier) -> Self {
        let pages = EntityCache::<Page>::with_default_key(Arc::clone(store), notifier.clone());
        let posts = EntityCache::<BlogPost>::with_default_key(Arc::clone(store), notifier.clone());
        Self::new().register(pages).register(posts)
    }

    /// Add (or replace) the source for its kind.
    #[must_use]
    pub fn register(mut self, source: impl TrashSource + 'static) -> Self {
        self.sources.insert(source.kind(), Arc::new(source));
        self
    }

    /// Registered kinds, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EntityKind> {
        self.sources.keys().copied().collect()
    }

    fn source(&self, kind: EntityKind) -> Result<&Arc<dyn TrashSource>, StoreError> {
        self.sources.get(&kind).ok_or(StoreError::UnknownKind(kind))
    }

    /// Every trashed record of every kind, most recently deleted first.
    ///
    /// A kind whose cache is unreadable contributes nothing; it is logged and
    /// the other kinds are still listed.
    pub async fn list_trash(&self) -> Vec<TrashItem> {
        let mut items = Vec::new();
        for (kind, source) in &self.sources {
            match source.trashed().await {
                Ok(found) => items.extend(found),
                Err(e) => warn!(%kind, error = %e, "Skipping unreadable trash"),
            }
        }
        items.sort_by(|a, b| newest_first(a.deleted_at(), b.deleted_at()));
        items
    }

    /// [`list_trash`](Self::list_trash) narrowed by kind and title search.
    pub async fn list_trash_filtered(&self, filter: &TrashFilter) -> Vec<TrashItem> {
        self.list_trash()
            .await
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect()
    }

    pub async fn restore(&self, item: &TrashItem) -> Result<bool, StoreError> {
        self.restore_id(item.kind(), item.id()).await
    }

    pub async fn purge(&self, item: &TrashItem) -> Result<bool, StoreError> {
        self.purge_id(item.kind(), item.id()).await
    }

    pub async fn restore_id(&self, kind: EntityKind, id: &str) -> Result<bool, StoreError> {
        self.source(kind)?.restore_id(id).await
    }

    pub async fn purge_id(&self, kind: EntityKind, id: &str) -> Result<bool, StoreError> {
        self.source(kind)?.purge_id(id).await
    }

    /// Empty the trash of every kind.
    ///
    /// Not atomic across kinds: a kind that fails is recorded in
    /// [`PurgeSummary::skipped`] and the rest proceed.
    pub async fn purge_all_across_kinds(&self) -> PurgeSummary {
        let mut summary = PurgeSummary::default();
        for (kind, source) in &self.sources {
            match source.empty_trash().await {
                Ok(count) => {
                    summary.purged.insert(*kind, count);
                }
                Err(e) => {
                    warn!(%kind, error = %e, "Skipping trash that could not be emptied");
                    summary.skipped.push(*kind);
                }
            }
        }
        info!(total = summary.total(), skipped = summary.skipped.len(), "Emptied trash");
        summary
    }

    /// Remove trashed records past the retention window, per kind, with the
    /// same skip-on-failure behaviour as
    /// [`purge_all_across_kinds`](Self::purge_all_across_kinds).
    pub async fn purge_expired_across_kinds(
        &self,
        now: DateTime<Utc>,
        retention_days: u32,
    ) -> PurgeSummary {
        let mut summary = PurgeSummary::default();
        for (kind, source) in &self.sources {
            match source.expire(now, retention_days).await {
                Ok(count) => {
                    summary.purged.insert(*kind, count);
                }
                Err(e) => {
                    warn!(%kind, error = %e, "Skipping trash that could not be expired");
                    summary.skipped.push(*kind);
                }
            }
        }
        info!(total = summary.total(), retention_days, "Expired old trash");
        summary
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod aggregator_tests;
