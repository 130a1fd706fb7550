//! The persisted QR record and its insert payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{RecordId, UserId};

/// A stored QR-code metadata record.
///
/// `deleted_at` is the soft-delete marker: a record with a timestamp
/// there is excluded from every read, see [`QrRecord::is_active`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrRecord {
    /// Store-assigned primary key.
    pub id: RecordId,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp, `null` while the record is live.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Owner key taken from the request path.
    pub user_id: UserId,
    /// Encoded URL.
    pub url: String,
    /// Free-form client date.
    pub date: String,
    /// Opaque image reference or payload.
    pub image: String,
}

impl QrRecord {
    /// Returns `true` while the record has not been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Returns `true` if the record is live and owned by `user_id`.
    #[must_use]
    pub fn is_active_for(&self, user_id: &UserId) -> bool {
        self.is_active() && &self.user_id == user_id
    }
}

/// Fields needed to insert a new record. Identity and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQrRecord {
    /// Owner key.
    pub user_id: UserId,
    /// Encoded URL.
    pub url: String,
    /// Free-form client date.
    pub date: String,
    /// Opaque image reference or payload.
    pub image: String,
}

impl NewQrRecord {
    /// Materializes the record with store-assigned identity and timestamps.
    #[must_use]
    pub fn into_record(self, id: RecordId, now: DateTime<Utc>) -> QrRecord {
        QrRecord {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            user_id: self.user_id,
            url: self.url,
            date: self.date,
            image: self.image,
        }
    }
}
