//! SQLite store for per-period, per-resource hit counts.

use std::path::Path;

use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::{Result, StoreError};
use crate::models::{AccessRecord, Granularity};


const SELECT_BY_LENGTH: &str = "SELECT record_date, resource, SUM(record_count) AS total
     FROM records WHERE length(record_date) = ?1
     GROUP BY record_date, resource
     ORDER BY record_date DESC, total DESC, resource ASC
     LIMIT ?2";

const SELECT_BY_DATE: &str = "SELECT record_date, resource, SUM(record_count) AS total
     FROM records WHERE record_date = ?1
     GROUP BY record_date, resource
     ORDER BY record_date DESC, total DESC, resource ASC
     LIMIT ?2";

/// SQLite treats a negative LIMIT as "no limit".
const NO_LIMIT: i64 = -1;


/// Selects which rows `RecordStore::query_records` aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateQuery {
    /// Every record whose date key has this many characters.
    Length(usize),
    /// Records whose date key equals this string.
    Exact(String),
}

impl From<usize> for DateQuery {
    fn from(len: usize) -> Self {
        DateQuery::Length(len)
    }
}

impl From<&str> for DateQuery {
    fn from(date: &str) -> Self {
        DateQuery::Exact(date.to_string())
    }
}

impl From<String> for DateQuery {
    fn from(date: String) -> Self {
        DateQuery::Exact(date)
    }
}

impl From<Granularity> for DateQuery {
    fn from(granularity: Granularity) -> Self {
        DateQuery::Length(granularity.key_len())
    }
}


/// Result rows of `RecordStore::query_records`.
///
/// Consumed once; there is no way to rewind it.
#[derive(Debug)]
pub struct RecordRows {
    inner: std::vec::IntoIter<AccessRecord>,
}

impl Iterator for RecordRows {
    type Item = AccessRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for RecordRows {}


/// Owns one SQLite connection and the `records` table behind it.
///
/// Not meant to be shared between threads. Writes are collected in an
/// implicit transaction that `commit()` flushes; dropping or closing the
/// store without committing discards them.
#[derive(Debug, Default)]
pub struct RecordStore {
    conn: Option<Connection>,
}


impl RecordStore {
    /// Create a store with no open connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and connect it in one step.
    pub fn open(conn_info: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.connect(conn_info)?;
        Ok(store)
    }

    /// Open the database at `conn_info`. Accepts a file path or `:memory:`.
    ///
    /// An already open connection is replaced, discarding its pending writes.
    pub fn connect(&mut self, conn_info: impl AsRef<Path>) -> Result<()> {
        let path = conn_info.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Connection {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Connected to {}", path.display());
        self.conn = Some(conn);
        Ok(())
    }

    #[allow(dead_code)]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Create the `records` table and its unique index if missing.
    pub fn setup(&mut self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                record_date VARCHAR(10),
                resource VARCHAR(256),
                record_count INTEGER
            )",
            [],
        )?;

        conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS date_content ON records (record_date, resource)",
            [],
        )?;

        debug!("Records schema ready");
        Ok(())
    }

    /// Flush pending writes. Does nothing when no write is pending.
    pub fn commit(&mut self) -> Result<()> {
        let conn = self.conn()?;

        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT")?;
            debug!("Committed pending writes");
        }

        Ok(())
    }

    /// Close the connection. Uncommitted writes are rolled back.
    pub fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or(StoreError::NotConnected)?;
        conn.close().map_err(|(_, e)| StoreError::Query(e))?;

        debug!("Connection closed");
        Ok(())
    }

    /// Delete records whose date key has the same length as `period` but a
    /// different value. Returns the number of deleted rows.
    ///
    /// Matching is purely on string length: `"2024"` prunes every other
    /// four-character key and leaves month or day keys alone.
    pub fn delete_stale_records(&mut self, period: &str) -> Result<usize> {
        let conn = self.writer()?;

        let deleted = conn.execute(
            "DELETE FROM records WHERE length(record_date) = ?1 AND record_date != ?2",
            params![period.chars().count() as i64, period],
        )?;

        debug!("Deleted {} stale records (kept {})", deleted, period);
        Ok(deleted)
    }

    /// Sum counts per date and resource for the selected rows.
    ///
    /// Rows come back ordered by date descending, total descending, then
    /// resource ascending. A `limit` of `None` or `Some(0)` returns all rows.
    pub fn query_records(
        &self,
        date_query: impl Into<DateQuery>,
        limit: Option<u32>,
    ) -> Result<RecordRows> {
        let mut records = Vec::new();
        self.for_each_record(date_query, limit, |record| records.push(record))?;

        Ok(RecordRows { inner: records.into_iter() })
    }

    /// Same selection and order as `query_records`, but hands each row to
    /// `f` as it is read instead of buffering. Returns the number of rows.
    pub fn for_each_record<F>(
        &self,
        date_query: impl Into<DateQuery>,
        limit: Option<u32>,
        mut f: F,
    ) -> Result<usize>
    where
        F: FnMut(AccessRecord),
    {
        let conn = self.conn()?;
        let limit = limit.filter(|&n| n > 0).map_or(NO_LIMIT, i64::from);

        let date_query: DateQuery = date_query.into();
        let (sql, key) = match date_query {
            DateQuery::Length(len) => (SELECT_BY_LENGTH, Value::Integer(len as i64)),
            DateQuery::Exact(date) => (SELECT_BY_DATE, Value::Text(date)),
        };

        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params![key, limit])?;

        let mut seen = 0;
        while let Some(row) = rows.next()? {
            f(map_record(row)?);
            seen += 1;
        }

        Ok(seen)
    }

    /// Stored count for the pair, or 0 when no row exists.
    pub fn query_record_count(&self, record_date: &str, resource: &str) -> Result<i64> {
        let count = self
            .conn()?
            .query_row(
                "SELECT record_count FROM records WHERE record_date = ?1 AND resource = ?2",
                params![record_date, resource],
                |row| row.get(0),
            )
            .optional()?;

        Ok(count.unwrap_or(0))
    }

    /// Overwrite the count of an existing row. Returns the number of rows
    /// changed, which is 0 when the pair is not stored.
    pub fn update_record_count(
        &mut self,
        count: i64,
        record_date: &str,
        resource: &str,
    ) -> Result<usize> {
        let updated = self.writer()?.execute(
            "UPDATE records SET record_count = ?1 WHERE record_date = ?2 AND resource = ?3",
            params![count, record_date, resource],
        )?;

        Ok(updated)
    }

    /// Insert a new row. Fails with `UniqueConstraintViolation` when the pair
    /// is already stored.
    pub fn insert_record_count(
        &mut self,
        count: i64,
        record_date: &str,
        resource: &str,
    ) -> Result<()> {
        let result = self.writer()?.execute(
            "INSERT INTO records (record_date, resource, record_count) VALUES (?1, ?2, ?3)",
            params![record_date, resource, count],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::UniqueConstraintViolation {
                    record_date: record_date.to_string(),
                    resource: resource.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Insert the row or overwrite its count in a single statement.
    pub fn upsert_record_count(
        &mut self,
        count: i64,
        record_date: &str,
        resource: &str,
    ) -> Result<()> {
        self.writer()?.execute(
            "INSERT INTO records (record_date, resource, record_count) VALUES (?1, ?2, ?3)
             ON CONFLICT(record_date, resource) DO UPDATE SET record_count = excluded.record_count",
            params![record_date, resource, count],
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(StoreError::NotConnected)
    }

    /// Connection for a write, opening the implicit transaction if needed.
    fn writer(&self) -> Result<&Connection> {
        let conn = self.conn()?;
        if conn.is_autocommit() {
            conn.execute_batch("BEGIN")?;
        }
        Ok(conn)
    }
}


fn map_record(row: &Row<'_>) -> rusqlite::Result<AccessRecord> {
    Ok(AccessRecord {
        record_date: row.get(0)?,
        resource: row.get(1)?,
        record_count: row.get(2)?,
    })
}
