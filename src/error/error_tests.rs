use super::*;

#[test]
fn test_protected_page_user_message() {
    let err = StoreError::ProtectedEntity {
        kind: EntityKind::Page,
        id: "home-page".to_string(),
    };
    assert_eq!(err.user_message(), "The home page cannot be deleted.");
    assert_eq!(
        err.to_string(),
        "The page 'home-page' is protected and cannot be deleted"
    );
}

#[test]
fn test_not_deleted_display() {
    let err = StoreError::NotDeleted {
        kind: EntityKind::Post,
        id: "p1".to_string(),
    };
    assert_eq!(err.user_message(), "The post 'p1' is not in the trash");
}

#[test]
fn test_corrupt_cache_is_flagged() {
    let source = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
    let err = StoreError::CorruptCache {
        key: "chukfi_pages".to_string(),
        source,
    };
    assert!(err.is_corrupt_cache());
    assert!(err.to_string().starts_with("Cached 'chukfi_pages'"));
    assert!(!StoreError::UnknownKind(EntityKind::Post).is_corrupt_cache());
}
