//! In-process record store.
//!
//! [`MemoryStore`] keeps every record, live or soft-deleted, in a
//! `BTreeMap` keyed by id behind a [`tokio::sync::RwLock`]. Ids come from
//! a counter that only grows, so they are never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::RecordStore;
use crate::domain::{NewQrRecord, QrRecord, RecordId, UserId};
use crate::error::LedgerError;

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    records: BTreeMap<RecordId, QrRecord>,
}

/// Record store held entirely in memory.
///
/// # Concurrency
///
/// - Reads (`list_active`, `find_active`) share the lock.
/// - Writes (`insert`, `soft_delete`) are serialized.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store. The first inserted record gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }

    /// Returns the number of stored rows, soft-deleted ones included.
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Returns `true` if nothing was ever inserted.
    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(
        &self,
        record: NewQrRecord,
        now: DateTime<Utc>,
    ) -> Result<QrRecord, LedgerError> {
        let mut state = self.state.write().await;
        let id = RecordId::new(state.next_id);
        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| LedgerError::Persistence("record id space exhausted".to_string()))?;

        let stored = record.into_record(id, now);
        state.records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_active(&self, user_id: &UserId) -> Result<Vec<QrRecord>, LedgerError> {
        let state = self.state.read().await;
        Ok(state
            .records
            .values()
            .filter(|record| record.is_active_for(user_id))
            .cloned()
            .collect())
    }

    async fn find_active(
        &self,
        user_id: &UserId,
        id: RecordId,
    ) -> Result<Option<QrRecord>, LedgerError> {
        let state = self.state.read().await;
        Ok(state
            .records
            .get(&id)
            .filter(|record| record.is_active_for(user_id))
            .cloned())
    }

    async fn soft_delete(&self, id: RecordId, now: DateTime<Utc>) -> Result<bool, LedgerError> {
        let mut state = self.state.write().await;
        match state.records.get_mut(&id) {
            Some(record) if record.is_active() => {
                record.deleted_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn new_record(user: &str, url: &str) -> NewQrRecord {
        NewQrRecord {
            user_id: UserId::from(user),
            url: url.to_string(),
            date: "2024-01-01".to_string(),
            image: "img".to_string(),
        }
    }

    async fn insert(store: &MemoryStore, user: &str, url: &str) -> QrRecord {
        let Ok(record) = store.insert(new_record(user, url), Utc::now()).await else {
            panic!("insert failed");
        };
        record
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = MemoryStore::new();
        let a = insert(&store, "u1", "http://a").await;
        let b = insert(&store, "u1", "http://b").await;
        assert_eq!(a.id, RecordId::new(1));
        assert_eq!(b.id, RecordId::new(2));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = insert(&store, "u1", "http://a").await;
        let _ = store.soft_delete(a.id, Utc::now()).await;
        let b = insert(&store, "u1", "http://b").await;
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_is_partitioned_by_user() {
        let store = MemoryStore::new();
        insert(&store, "u1", "http://a").await;
        insert(&store, "u2", "http://b").await;
        insert(&store, "u1", "http://c").await;

        let Ok(listed) = store.list_active(&UserId::from("u1")).await else {
            panic!("list failed");
        };
        let urls: Vec<&str> = listed.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["http://a", "http://c"]);
    }

    #[tokio::test]
    async fn list_unknown_user_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        let listed = store.list_active(&UserId::from("nobody")).await;
        assert!(matches!(listed, Ok(ref v) if v.is_empty()));
    }

    #[tokio::test]
    async fn find_requires_matching_owner() {
        let store = MemoryStore::new();
        let record = insert(&store, "u1", "http://a").await;

        let hit = store.find_active(&UserId::from("u1"), record.id).await;
        assert!(matches!(hit, Ok(Some(_))));

        let miss = store.find_active(&UserId::from("u2"), record.id).await;
        assert!(matches!(miss, Ok(None)));
    }

    #[tokio::test]
    async fn soft_deleted_records_are_hidden() {
        let store = MemoryStore::new();
        let record = insert(&store, "u1", "http://a").await;

        assert!(matches!(store.soft_delete(record.id, Utc::now()).await, Ok(true)));
        assert!(matches!(store.soft_delete(record.id, Utc::now()).await, Ok(false)));

        let found = store.find_active(&UserId::from("u1"), record.id).await;
        assert!(matches!(found, Ok(None)));
        let listed = store.list_active(&UserId::from("u1")).await;
        assert!(matches!(listed, Ok(ref v) if v.is_empty()));
    }

    #[tokio::test]
    async fn soft_delete_unknown_id_is_false() {
        let store = MemoryStore::new();
        let deleted = store.soft_delete(RecordId::new(99), Utc::now()).await;
        assert!(matches!(deleted, Ok(false)));
    }
}
