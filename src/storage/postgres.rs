//! PostgreSQL-backed record store.

use crate::domain::entry::{Entry, EntryFields};
use crate::storage::{EntryStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

pub const CREATE_ENTRIES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS entries (
    srno INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    branch TEXT NOT NULL,
    rollno TEXT NOT NULL
)";

#[derive(Clone)]
pub struct PostgresEntryStore {
    pool: PgPool,
}

impl PostgresEntryStore {
    /// Connects to `database_url` and makes sure the `entries` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::info!(max_connections, "connected to postgres");

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ENTRIES_TABLE_SQL)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let rows = sqlx::query("SELECT srno, name, branch, rollno FROM entries ORDER BY srno")
            .fetch_all(&self.pool)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(Entry {
                srno: row.try_get("srno")?,
                name: row.try_get("name")?,
                branch: row.try_get("branch")?,
                rollno: row.try_get("rollno")?,
            });
        }
        Ok(entries)
    }

    async fn insert(&self, entry: &Entry) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO entries (srno, name, branch, rollno) VALUES ($1, $2, $3, $4)")
            .bind(entry.srno)
            .bind(&entry.name)
            .bind(&entry.branch)
            .bind(&entry.rollno)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, srno: i32, fields: &EntryFields) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE entries SET name = $1, branch = $2, rollno = $3 WHERE srno = $4")
                .bind(&fields.name)
                .bind(&fields.branch)
                .bind(&fields.rollno)
                .bind(srno)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, srno: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM entries WHERE srno = $1")
            .bind(srno)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
