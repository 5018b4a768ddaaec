//! Record store: the single `entries` table and its backends.

use crate::domain::entry::{Entry, EntryFields};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryEntryStore;
pub use postgres::PostgresEntryStore;

/// Store failures. All of them reach HTTP clients as a generic `500`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required column was missing from the write.
    #[error("Column '{0}' cannot be null")]
    NullField(&'static str),
    #[error("duplicate key value violates unique constraint: srno {0} already exists")]
    DuplicateKey(i32),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Single-statement operations over the `entries` table.
///
/// Each method maps to exactly one SQL statement; nothing spans statements.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every record, ordered by serial number.
    async fn list(&self) -> Result<Vec<Entry>, StoreError>;

    /// Inserts a new record; a taken serial number is a constraint failure.
    async fn insert(&self, entry: &Entry) -> Result<(), StoreError>;

    /// Replaces name/branch/rollno. Returns the number of rows affected.
    async fn update(&self, srno: i32, fields: &EntryFields) -> Result<u64, StoreError>;

    /// Removes a record. Returns the number of rows affected.
    async fn delete(&self, srno: i32) -> Result<u64, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
