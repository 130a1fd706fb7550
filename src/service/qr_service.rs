//! QR record service: create, list and delete per user.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{NewQrRecord, QrRecord, RecordId, UserId};
use crate::error::LedgerError;
use crate::persistence::RecordStore;

/// Orchestration layer for all record operations.
///
/// Holds the store as an explicit dependency. Each operation issues its
/// queries directly against the store; no locking or caching happens
/// here.
#[derive(Debug, Clone)]
pub struct QrService {
    store: Arc<dyn RecordStore>,
}

impl QrService {
    /// Creates a new `QrService` over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stores a new record for `user_id`.
    ///
    /// The owner always comes from `user_id`; callers cannot pick it
    /// through the record fields.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        url: String,
        date: String,
        image: String,
    ) -> Result<QrRecord, LedgerError> {
        let record = self
            .store
            .insert(
                NewQrRecord {
                    user_id,
                    url,
                    date,
                    image,
                },
                Utc::now(),
            )
            .await?;

        tracing::info!(id = %record.id, user_id = %record.user_id, "qr record created");
        Ok(record)
    }

    /// Lists the live records of `user_id`. Unknown users get an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the query fails.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<QrRecord>, LedgerError> {
        let records = self.store.list_active(user_id).await?;
        tracing::debug!(%user_id, count = records.len(), "qr records listed");
        Ok(records)
    }

    /// Soft-deletes record `id` of `user_id`.
    ///
    /// An id owned by another user is reported exactly like a missing id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RecordNotFound`] if no live record matches
    /// both keys, or [`LedgerError::Persistence`] on store failure.
    pub async fn delete(&self, user_id: &UserId, id: RecordId) -> Result<(), LedgerError> {
        let record = self
            .store
            .find_active(user_id, id)
            .await?
            .ok_or(LedgerError::RecordNotFound)?;

        // A concurrent delete may have won between lookup and update.
        if !self.store.soft_delete(record.id, Utc::now()).await? {
            return Err(LedgerError::RecordNotFound);
        }

        tracing::info!(%id, %user_id, "qr record deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn make_service() -> QrService {
        QrService::new(Arc::new(MemoryStore::new()))
    }

    async fn create(service: &QrService, user: &str, url: &str) -> QrRecord {
        let Ok(record) = service
            .create(
                UserId::from(user),
                url.to_string(),
                "2024-01-01".to_string(),
                "img1".to_string(),
            )
            .await
        else {
            panic!("create failed");
        };
        record
    }

    #[tokio::test]
    async fn create_assigns_owner_and_timestamps() {
        let service = make_service();
        let record = create(&service, "u1", "http://a").await;
        assert_eq!(record.user_id, UserId::from("u1"));
        assert_eq!(record.url, "http://a");
        assert!(record.deleted_at.is_none());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn list_only_returns_own_records() {
        let service = make_service();
        create(&service, "alice", "http://a").await;
        create(&service, "bob", "http://b").await;

        let Ok(alice) = service.list(&UserId::from("alice")).await else {
            panic!("list failed");
        };
        assert_eq!(alice.len(), 1);
        assert!(alice.iter().all(|r| r.user_id == UserId::from("alice")));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let service = make_service();
        let record = create(&service, "u1", "http://a").await;
        let user = UserId::from("u1");

        assert!(service.delete(&user, record.id).await.is_ok());
        let second = service.delete(&user, record.id).await;
        assert!(matches!(second, Err(LedgerError::RecordNotFound)));
    }

    #[tokio::test]
    async fn delete_with_wrong_owner_is_not_found() {
        let service = make_service();
        let record = create(&service, "u1", "http://a").await;

        let result = service.delete(&UserId::from("u2"), record.id).await;
        assert!(matches!(result, Err(LedgerError::RecordNotFound)));

        let Ok(still_there) = service.list(&UserId::from("u1")).await else {
            panic!("list failed");
        };
        assert_eq!(still_there.len(), 1);
    }

    #[tokio::test]
    async fn deleted_record_disappears_from_list() {
        let service = make_service();
        let keep = create(&service, "u1", "http://keep").await;
        let gone = create(&service, "u1", "http://drop").await;
        let user = UserId::from("u1");

        assert!(service.delete(&user, gone.id).await.is_ok());

        let Ok(listed) = service.list(&user).await else {
            panic!("list failed");
        };
        assert_eq!(listed, vec![keep]);
    }
}
