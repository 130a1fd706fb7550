//! Persistence layer: the [`RecordStore`] seam and its implementations.
//!
//! [`PostgresStore`] is the production store backed by `sqlx::PgPool`.
//! [`MemoryStore`] keeps records in process memory and is used by tests
//! and local runs without a database.
//!
//! Every read path only returns live records. A soft-deleted record
//! (one with `deleted_at` set) is invisible to [`RecordStore::list_active`]
//! and [`RecordStore::find_active`], and [`RecordStore::soft_delete`] never
//! touches it again.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewQrRecord, QrRecord, RecordId, UserId};
use crate::error::LedgerError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage operations required by the record service.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new record stamped with `now` and returns it with its
    /// assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on store failure.
    async fn insert(&self, record: NewQrRecord, now: DateTime<Utc>)
    -> Result<QrRecord, LedgerError>;

    /// Returns all live records owned by `user_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on store failure.
    async fn list_active(&self, user_id: &UserId) -> Result<Vec<QrRecord>, LedgerError>;

    /// Looks up the live record with `id` owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on store failure.
    async fn find_active(
        &self,
        user_id: &UserId,
        id: RecordId,
    ) -> Result<Option<QrRecord>, LedgerError>;

    /// Marks the live record `id` as deleted at `now`.
    ///
    /// Returns `false` if the record was already deleted or never existed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on store failure.
    async fn soft_delete(&self, id: RecordId, now: DateTime<Utc>) -> Result<bool, LedgerError>;
}
