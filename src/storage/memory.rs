//! In-process record store for tests and database-free demos.

use crate::domain::entry::{Entry, EntryFields};
use crate::storage::{EntryStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Rows keyed by serial number. The lock only makes each call atomic,
/// like a single SQL statement.
#[derive(Default)]
pub struct MemoryEntryStore {
    rows: RwLock<BTreeMap<i32, EntryFields>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let rows = entries
            .into_iter()
            .map(|e| {
                let srno = e.srno;
                (srno, e.fields())
            })
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .map(|(srno, fields)| Entry::with_fields(*srno, fields.clone()))
            .collect())
    }

    async fn insert(&self, entry: &Entry) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entry.srno) {
            return Err(StoreError::DuplicateKey(entry.srno));
        }
        rows.insert(entry.srno, entry.fields());
        Ok(())
    }

    async fn update(&self, srno: i32, fields: &EntryFields) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&srno) {
            Some(row) => {
                *row = fields.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, srno: i32) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(&srno).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
