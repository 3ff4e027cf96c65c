//! Persistence seams for users and entries
//!
//! Services depend on these traits only. [`PgUserRepository`] and
//! [`PgEntryRepository`] back them with PostgreSQL; the [`memory`] module
//! keeps everything in process.

use async_trait::async_trait;
use common::error::DatabaseResult;
use rust_decimal::Decimal;

use crate::models::{Entry, EntryStatus, EntryType, NewUser, User};

pub mod entry;
pub mod memory;
pub mod user;

pub use entry::PgEntryRepository;
pub use memory::{InMemoryEntryRepository, InMemoryUserRepository};
pub use user::PgUserRepository;

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool>;

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>>;

    async fn find_all(&self) -> DatabaseResult<Vec<User>>;

    /// Insert a user and return it with its generated id.
    /// A duplicate email yields `DatabaseError::Conflict`.
    async fn save(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Entry persistence
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert when `entry.id` is unset, otherwise overwrite the existing row.
    /// Overwriting a missing row yields `DatabaseError::NotFound`.
    async fn save(&self, entry: &Entry) -> DatabaseResult<Entry>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Entry>>;

    async fn find_all(&self) -> DatabaseResult<Vec<Entry>>;

    /// Entries agreeing with every attribute set on `filter`, ordered by id
    async fn find_by_filter(&self, filter: &Entry) -> DatabaseResult<Vec<Entry>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;

    /// Sum of amounts over one user's entries of the given type and status.
    /// `None` when no entry matches.
    async fn balance_by_user_type_and_status(
        &self,
        user_id: i64,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> DatabaseResult<Option<Decimal>>;
}
