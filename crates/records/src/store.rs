//! Record storage boundary.
//!
//! The real backend lives outside this workspace. Whatever implements
//! [`RecordStore`] is built at start-up and passed to the code that needs it;
//! rows always belong to one owner and are invisible to everyone else.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use millbook_core::{DomainError, OwnerId, RecordId};
use millbook_events::EventBus;

use crate::change::{ChangeKind, RecordChange};
use crate::record::{Record, RecordKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub owner: OwnerId,
    pub record: Record,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("record store lock poisoned")]
    Poisoned,

    /// The mutation was applied but its change notification was not delivered.
    #[error("change notification failed: {0}")]
    Publish(String),
}

/// Owner-scoped CRUD over mill records.
pub trait RecordStore: Send + Sync {
    fn insert(&self, owner: OwnerId, record: Record) -> Result<StoredRecord, StoreError>;

    /// Replace a record's contents. The record kind cannot change.
    fn update(&self, owner: OwnerId, id: RecordId, record: Record) -> Result<StoredRecord, StoreError>;

    fn delete(&self, owner: OwnerId, id: RecordId) -> Result<(), StoreError>;

    fn get(&self, owner: OwnerId, id: RecordId) -> Result<StoredRecord, StoreError>;

    /// Owner's records in creation order, optionally limited to one kind.
    fn list(&self, owner: OwnerId, kind: Option<RecordKind>) -> Result<Vec<StoredRecord>, StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn insert(&self, owner: OwnerId, record: Record) -> Result<StoredRecord, StoreError> {
        (**self).insert(owner, record)
    }

    fn update(&self, owner: OwnerId, id: RecordId, record: Record) -> Result<StoredRecord, StoreError> {
        (**self).update(owner, id, record)
    }

    fn delete(&self, owner: OwnerId, id: RecordId) -> Result<(), StoreError> {
        (**self).delete(owner, id)
    }

    fn get(&self, owner: OwnerId, id: RecordId) -> Result<StoredRecord, StoreError> {
        (**self).get(owner, id)
    }

    fn list(&self, owner: OwnerId, kind: Option<RecordKind>) -> Result<Vec<StoredRecord>, StoreError> {
        (**self).list(owner, kind)
    }
}

/// In-memory record store for tests/dev.
///
/// Publishes a [`RecordChange`] on the injected bus after every successful
/// mutation, outside the store lock.
#[derive(Debug)]
pub struct InMemoryRecordStore<B> {
    rows: RwLock<HashMap<RecordId, Row>>,
    next_seq: AtomicU64,
    bus: B,
}

/// Stored row plus its insertion position, for stable listing order.
#[derive(Debug, Clone)]
struct Row {
    seq: u64,
    stored: StoredRecord,
}

impl<B> InMemoryRecordStore<B>
where
    B: EventBus<RecordChange>,
{
    pub fn new(bus: B) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            bus,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    fn notify(&self, change: ChangeKind, row: &StoredRecord, occurred_at: DateTime<Utc>) -> Result<(), StoreError> {
        let event = RecordChange {
            change,
            kind: row.record.kind(),
            record_id: row.id,
            owner: row.owner,
            occurred_at,
        };
        self.bus.publish(event).map_err(|e| {
            tracing::warn!(record_id = %row.id, error = ?e, "failed to publish record change");
            StoreError::Publish(format!("{e:?}"))
        })
    }
}

fn owned(row: Option<&Row>, owner: OwnerId) -> Result<&Row, StoreError> {
    match row {
        Some(row) if row.stored.owner == owner => Ok(row),
        _ => Err(DomainError::not_found().into()),
    }
}

impl<B> RecordStore for InMemoryRecordStore<B>
where
    B: EventBus<RecordChange>,
{
    fn insert(&self, owner: OwnerId, record: Record) -> Result<StoredRecord, StoreError> {
        let now = Utc::now();
        let row = StoredRecord {
            id: RecordId::new(),
            owner,
            record,
            created_at: now,
            updated_at: now,
        };

        {
            let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
            let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
            rows.insert(
                row.id,
                Row {
                    seq,
                    stored: row.clone(),
                },
            );
        }

        tracing::debug!(record_id = %row.id, kind = %row.record.kind(), "record inserted");
        self.notify(ChangeKind::Insert, &row, now)?;
        Ok(row)
    }

    fn update(&self, owner: OwnerId, id: RecordId, record: Record) -> Result<StoredRecord, StoreError> {
        let now = Utc::now();
        let row = {
            let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
            let existing = owned(rows.get(&id), owner)?;
            if existing.stored.record.kind() != record.kind() {
                return Err(DomainError::validation(format!(
                    "cannot change a {} record into a {}",
                    existing.stored.record.kind(),
                    record.kind()
                ))
                .into());
            }

            let seq = existing.seq;
            let updated = StoredRecord {
                record,
                updated_at: now,
                ..existing.stored.clone()
            };
            rows.insert(
                id,
                Row {
                    seq,
                    stored: updated.clone(),
                },
            );
            updated
        };

        tracing::debug!(record_id = %id, kind = %row.record.kind(), "record updated");
        self.notify(ChangeKind::Update, &row, now)?;
        Ok(row)
    }

    fn delete(&self, owner: OwnerId, id: RecordId) -> Result<(), StoreError> {
        let row = {
            let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
            owned(rows.get(&id), owner)?;
            rows.remove(&id)
                .map(|row| row.stored)
                .ok_or_else(|| StoreError::from(DomainError::not_found()))?
        };

        tracing::debug!(record_id = %id, kind = %row.record.kind(), "record deleted");
        self.notify(ChangeKind::Delete, &row, Utc::now())
    }

    fn get(&self, owner: OwnerId, id: RecordId) -> Result<StoredRecord, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        owned(rows.get(&id), owner).map(|row| row.stored.clone())
    }

    fn list(&self, owner: OwnerId, kind: Option<RecordKind>) -> Result<Vec<StoredRecord>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        let mut out: Vec<&Row> = rows
            .values()
            .filter(|row| row.stored.owner == owner)
            .filter(|row| kind.is_none_or(|k| row.stored.record.kind() == k))
            .collect();
        out.sort_by_key(|row| row.seq);
        Ok(out.into_iter().map(|row| row.stored.clone()).collect())
    }
}
