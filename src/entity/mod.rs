//! Entity kinds managed by the soft-delete store.
//!
//! Each kind is stored as one JSON array under its own key. Records keep any
//! field this crate does not model, so a write never loses data another part
//! of the dashboard put there.

mod page;
mod post;

pub use page::{Page, PageLayout, PageStatus, Seo, HOME_PAGE_ID};
pub use post::{BlogPost, PostStatus};

use crate::trash::TrashItem;
use crate::utils::parse_timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind discriminator used for storage keys, notifications and trash tags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Page,
    Post,
}

impl EntityKind {
    /// Every kind, in registration order.
    pub const ALL: [EntityKind; 2] = [EntityKind::Page, EntityKind::Post];

    /// Storage key the dashboard uses for this kind.
    #[must_use]
    pub fn default_storage_key(self) -> &'static str {
        match self {
            EntityKind::Page => "chukfi_pages",
            EntityKind::Post => "chukfi_blog_posts",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Page => write!(f, "page"),
            EntityKind::Post => write!(f, "post"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "page" | "pages" => Ok(EntityKind::Page),
            "post" | "posts" | "blog-post" | "blog-posts" => Ok(EntityKind::Post),
            _ => Err(format!("Unknown entity kind: {s}")),
        }
    }
}

/// A record that can live in an [`EntityCache`](crate::cache::EntityCache).
///
/// `deleted_at` is the only field the store itself manages; everything else is
/// owned by editors.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Kind of every record of this type. Never changes for a given id.
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn title(&self) -> &str;

    fn slug(&self) -> &str;

    /// ISO timestamp of the last editor update, if recorded.
    fn updated_at(&self) -> Option<&str>;

    /// ISO timestamp when soft-deleted (`None` if live).
    fn deleted_at(&self) -> Option<&str>;

    fn set_deleted_at(&mut self, timestamp: Option<String>);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Protected records can never be soft-deleted.
    fn is_protected(&self) -> bool {
        false
    }

    /// Ids reserved for protected records, even before such a record is stored.
    fn is_protected_id(_id: &str) -> bool {
        false
    }

    /// Order of the active list. Defaults to most recently updated first.
    fn active_order(a: &Self, b: &Self) -> Ordering {
        newest_first(a.updated_at(), b.updated_at())
    }

    /// Repair kind-level invariants after a load. Returns `true` if `records`
    /// changed and must be persisted.
    fn ensure_invariants(_records: &mut Vec<Self>, _now: &str) -> bool {
        false
    }

    /// Tag this record for the cross-kind trash.
    fn into_trash_item(self) -> TrashItem;
}

/// Descending timestamp order; missing or unparseable timestamps sort last.
#[must_use]
pub fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse_timestamp);
    let b = b.and_then(parse_timestamp);
    b.cmp(&a)
}
