//! Entity lifecycle: soft delete, restore, and permanent removal.
//!
//! ```text
//! [Active] --soft_delete--> [Deleted] --restore--> [Active]
//! [Deleted] --purge / purge_all / purge_expired--> [Gone]
//! ```

pub mod purge;
pub mod retention;
pub mod soft_delete;

pub use purge::Purgeable;
pub use retention::{days_remaining, is_expired, DEFAULT_RETENTION_DAYS};
pub use soft_delete::{Restorable, SoftDeletable};
