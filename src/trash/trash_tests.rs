use super::*;
use crate::entity::{PostStatus, HOME_PAGE_ID};

fn trashed_post(id: &str, title: &str) -> TrashItem {
    TrashItem::Post(BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        slug: id.to_string(),
        content: String::new(),
        excerpt: String::new(),
        status: PostStatus::Published,
        author: "ana".to_string(),
        featured_image: None,
        banner_image: None,
        featured: None,
        publish_at: None,
        created_at: None,
        updated_at: None,
        deleted_at: Some("2024-03-01T00:00:00.000Z".to_string()),
        extra: serde_json::Map::new(),
    })
}

#[test]
fn test_item_accessors() {
    let item = trashed_post("p1", "Launch Notes");
    assert_eq!(item.kind(), EntityKind::Post);
    assert_eq!(item.id(), "p1");
    assert_eq!(item.title(), "Launch Notes");
    assert_eq!(item.deleted_at(), Some("2024-03-01T00:00:00.000Z"));

    let page = TrashItem::Page(Page::default_home("2024-01-01T00:00:00.000Z"));
    assert_eq!(page.kind(), EntityKind::Page);
    assert_eq!(page.id(), HOME_PAGE_ID);
    assert_eq!(page.deleted_at(), None);
}

#[test]
fn test_item_serializes_with_type_tag() {
    let value = serde_json::to_value(trashed_post("p1", "Launch")).unwrap();
    assert_eq!(value["type"], "post");
    assert_eq!(value["record"]["id"], "p1");
}

#[test]
fn test_empty_filter_matches_everything() {
    assert!(TrashFilter::new().matches(&trashed_post("p1", "Anything")));
    assert!(TrashFilter::new().with_search("").matches(&trashed_post("p1", "Anything")));
}

#[test]
fn test_filter_by_kind() {
    let item = trashed_post("p1", "Launch");
    assert!(TrashFilter::new().with_kind(EntityKind::Post).matches(&item));
    assert!(!TrashFilter::new().with_kind(EntityKind::Page).matches(&item));
}

#[test]
fn test_filter_search_is_case_insensitive() {
    let item = trashed_post("p1", "Spring LAUNCH notes");
    assert!(TrashFilter::new().with_search("launch").matches(&item));
    assert!(!TrashFilter::new().with_search("autumn").matches(&item));
}
