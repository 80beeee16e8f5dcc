use super::{newest_first, Entity, EntityKind};
use crate::trash::TrashItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::warn;

/// Fixed id of the synthesized home page.
pub const HOME_PAGE_ID: &str = "home-page";

/// Page layout variants offered by the page editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageLayout {
    #[default]
    Default,
    FullWidth,
    Sidebar,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
}

/// Search-engine metadata attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A site page built from editor blocks.
///
/// Only `id` is required when reading: the page editor rewrites existing
/// pages without `createdAt`, and older records may lack other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// Block editor content, kept opaque.
    #[serde(default)]
    pub blocks: Vec<Value>,
    #[serde(default)]
    pub layout: PageLayout,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_home_page: Option<bool>,
    /// Fields written by other dashboard components.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    /// The default home page synthesized when none is live.
    #[must_use]
    pub fn default_home(now: &str) -> Self {
        Self {
            id: HOME_PAGE_ID.to_string(),
            title: "Home".to_string(),
            slug: String::new(),
            blocks: Vec::new(),
            layout: PageLayout::Default,
            status: PageStatus::Published,
            seo: Seo {
                title: "Home".to_string(),
                description: "Welcome to our website".to_string(),
                og_image: None,
                extra: Map::new(),
            },
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
            deleted_at: None,
            is_home_page: Some(true),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn is_home_page(&self) -> bool {
        self.is_home_page.unwrap_or(false)
    }
}

impl Entity for Page {
    const KIND: EntityKind = EntityKind::Page;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }

    fn set_deleted_at(&mut self, timestamp: Option<String>) {
        self.deleted_at = timestamp;
    }

    fn is_protected(&self) -> bool {
        self.is_home_page()
    }

    fn is_protected_id(id: &str) -> bool {
        id == HOME_PAGE_ID
    }

    /// Home page pinned first, then most recently updated.
    fn active_order(a: &Self, b: &Self) -> Ordering {
        b.is_home_page()
            .cmp(&a.is_home_page())
            .then_with(|| newest_first(a.updated_at(), b.updated_at()))
    }

    /// Exactly one live home page must exist.
    ///
    /// A home page found in the trash (written by something other than this
    /// store) is brought back rather than duplicated. When several live pages
    /// claim the flag, the one with the fixed home id keeps it, otherwise the
    /// first in display order; the rest lose the flag.
    fn ensure_invariants(records: &mut Vec<Self>, now: &str) -> bool {
        let keeper = records
            .iter()
            .filter(|p| p.is_home_page() && p.deleted_at.is_none())
            .min_by(|a, b| {
                (a.id != HOME_PAGE_ID)
                    .cmp(&(b.id != HOME_PAGE_ID))
                    .then_with(|| Self::active_order(a, b))
            })
            .map(|p| p.id.clone());

        if let Some(keeper) = keeper {
            let mut changed = false;
            for page in records.iter_mut() {
                if page.is_home_page() && page.deleted_at.is_none() && page.id != keeper {
                    warn!(id = %page.id, kept = %keeper, "Demoting duplicate home page");
                    page.is_home_page = None;
                    changed = true;
                }
            }
            return changed;
        }

        if let Some(page) = records.iter_mut().find(|p| p.is_home_page()) {
            warn!(id = %page.id, "Home page was in the trash; restoring it");
            page.deleted_at = None;
            return true;
        }

        if let Some(page) = records.iter_mut().find(|p| p.id == HOME_PAGE_ID) {
            warn!(id = HOME_PAGE_ID, "Home page exists without the home flag; promoting it");
            page.is_home_page = Some(true);
            page.deleted_at = None;
            return true;
        }

        records.insert(0, Page::default_home(now));
        true
    }

    fn into_trash_item(self) -> TrashItem {
        TrashItem::Page(self)
    }
}
