/*!
 * History repository.
 *
 * Async CRUD over the `translation_history` table. Records come back
 * newest first; a deleted record can be put back with `restore`, keeping
 * its original id and timestamp.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rusqlite::{OptionalExtension, params};

use super::connection::DatabaseConnection;
use super::models::HistoryRecord;
use crate::language_utils::LanguageMode;

/// Persistence seam used by the engine
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Save a record
    async fn append(&self, record: &HistoryRecord) -> Result<()>;

    /// Records, newest first, at most `limit` of them
    async fn list(&self, limit: Option<usize>) -> Result<Vec<HistoryRecord>>;

    /// Remove a record and return it, `None` when the id is unknown
    async fn delete(&self, id: &str) -> Result<Option<HistoryRecord>>;
}

const SELECT_COLUMNS: &str =
    "SELECT id, original_text, localized_script, translated_text, language, timestamp FROM translation_history";

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get(0)?,
        original_text: row.get(1)?,
        localized_script: row.get(2)?,
        translated_text: row.get(3)?,
        language: row
            .get::<_, String>(4)?
            .parse()
            .unwrap_or(LanguageMode::English),
        timestamp: row.get(5)?,
    })
}

fn insert_record(conn: &rusqlite::Connection, record: &HistoryRecord) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO translation_history (id, original_text, localized_script, translated_text, language, timestamp)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            record.id,
            record.original_text,
            record.localized_script,
            record.translated_text,
            record.language.code(),
            record.timestamp,
        ],
    )?;
    Ok(())
}

/// Repository for translation history
#[derive(Clone)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Repository on a throwaway in-memory database
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Look up one record
    pub async fn get(&self, id: &str) -> Result<Option<HistoryRecord>> {
        let id = id.to_string();
        self.db
            .execute_async(move |conn| {
                let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
                let record = conn.query_row(&sql, [&id], parse_history_row).optional()?;
                Ok(record)
            })
            .await
    }

    /// Put back a previously deleted record
    pub async fn restore(&self, record: HistoryRecord) -> Result<()> {
        debug!("Restoring history record {}", record.id);
        self.db.execute_async(move |conn| insert_record(conn, &record)).await
    }

    /// Delete every record, returns how many were removed
    pub async fn clear(&self) -> Result<usize> {
        self.db
            .execute_async(|conn| Ok(conn.execute("DELETE FROM translation_history", [])?))
            .await
    }

    pub async fn count(&self) -> Result<usize> {
        self.db
            .execute_async(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM translation_history", [], |row| row.get(0))?;
                Ok(count as usize)
            })
            .await
    }
}

#[async_trait]
impl HistoryStore for Repository {
    async fn append(&self, record: &HistoryRecord) -> Result<()> {
        debug!("Saving history record {}", record.id);
        let record = record.clone();
        self.db.execute_async(move |conn| insert_record(conn, &record)).await
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<HistoryRecord>> {
        self.db
            .execute_async(move |conn| {
                let sql = format!("{} ORDER BY timestamp DESC, seq DESC LIMIT ?1", SELECT_COLUMNS);
                // SQLite treats a negative LIMIT as unbounded
                let limit = limit.map(|l| l as i64).unwrap_or(-1);
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map([limit], parse_history_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<Option<HistoryRecord>> {
        let id = id.to_string();
        self.db
            .execute_async(move |conn| {
                let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
                let record = conn.query_row(&sql, [&id], parse_history_row).optional()?;
                if record.is_some() {
                    conn.execute("DELETE FROM translation_history WHERE id = ?1", [&id])?;
                }
                Ok(record)
            })
            .await
    }
}
