// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod cache;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod storage;
pub mod trash;
pub mod utils;

// Re-export commonly used types
pub use cache::EntityCache;
pub use config::{load_config, load_config_from, ConfigError, StoreConfig};
pub use entity::{BlogPost, Entity, EntityKind, Page, PostStatus, HOME_PAGE_ID};
pub use error::StoreError;
pub use events::{ChangeEvent, ChangeNotifier, ChangeSubscription};
pub use lifecycle::{days_remaining, Purgeable, Restorable, SoftDeletable};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use trash::{PurgeSummary, TrashAggregator, TrashFilter, TrashItem, TrashSource};
