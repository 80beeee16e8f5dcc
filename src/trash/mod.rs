//! Unified trash across entity kinds.

mod aggregator;
mod source;

pub use aggregator::{PurgeSummary, TrashAggregator};
pub use source::TrashSource;

use crate::entity::{BlogPost, Entity, EntityKind, Page};
use serde::Serialize;

/// A soft-deleted record tagged with the kind it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "lowercase")]
pub enum TrashItem {
    Page(Page),
    Post(BlogPost),
}

impl TrashItem {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            TrashItem::Page(_) => EntityKind::Page,
            TrashItem::Post(_) => EntityKind::Post,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            TrashItem::Page(page) => page.id(),
            TrashItem::Post(post) => post.id(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            TrashItem::Page(page) => page.title(),
            TrashItem::Post(post) => post.title(),
        }
    }

    #[must_use]
    pub fn deleted_at(&self) -> Option<&str> {
        match self {
            TrashItem::Page(page) => page.deleted_at(),
            TrashItem::Post(post) => post.deleted_at(),
        }
    }
}

/// Narrowing applied to the unified trash listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrashFilter {
    /// Only items of this kind (all kinds when `None`)
    pub kind: Option<EntityKind>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl TrashFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn matches(&self, item: &TrashItem) -> bool {
        if self.kind.is_some_and(|kind| kind != item.kind()) {
            return false;
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => item
                .title()
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

#[cfg(test)]
#[path = "trash_tests.rs"]
mod trash_tests;
