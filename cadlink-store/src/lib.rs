//! SQLite snapshot store for CADLink.
//!
//! Persists the relational snapshot of the live drawing: one table of
//! entity records keyed uniquely by host handle, one table of text-pattern
//! statistics keyed uniquely by pattern, and a generic read-query path
//! that returns column names plus loosely-typed row values.
//!
//! The store is explicitly passed state with its own lifecycle
//! ([`SnapshotStore::open`] / [`SnapshotStore::open_in_memory`]), never
//! ambient global state, so the engine can run against an in-memory store
//! in tests. All operations are synchronous over a single connection.

mod error;

pub use error::{StoreError, StoreResult};

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use cadlink_types::{EntityProperties, EntityRecord, PatternStat};

/// Result of executing caller-supplied query text.
///
/// Values are mapped loosely: NULL → `null`, INTEGER/REAL → numbers, TEXT
/// → strings, BLOB → lossy UTF-8 string.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// The snapshot store: entity records plus pattern statistics.
pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    /// Opens (creating if needed) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a fresh in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cad_elements (
                 id INTEGER PRIMARY KEY,
                 handle TEXT UNIQUE,
                 name TEXT NOT NULL,
                 type TEXT NOT NULL,
                 layer TEXT,
                 properties TEXT
             );
             CREATE TABLE IF NOT EXISTS text_patterns (
                 id INTEGER PRIMARY KEY,
                 pattern TEXT UNIQUE,
                 count INTEGER DEFAULT 0,
                 drawing TEXT
             );",
        )?;
        Ok(Self { conn })
    }

    /// Replaces the entire entity-record population in one transaction.
    ///
    /// Existing rows are dropped first; within the batch a later record
    /// sharing a handle with an earlier one wins (`INSERT OR REPLACE`
    /// keyed by handle). Records without a handle are stored with a NULL
    /// handle — they remain queryable but can never be correlated back to
    /// the live drawing. Returns the resulting row count.
    pub fn replace_all(&mut self, records: &[EntityRecord]) -> StoreResult<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM cad_elements", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO cad_elements (handle, name, type, layer, properties)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.handle,
                    record.name,
                    record.entity_type,
                    record.layer,
                    record.properties.to_json()?,
                ])?;
            }
        }
        tx.commit()?;
        let population: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cad_elements", [], |row| row.get(0))?;
        debug!(records = records.len(), population, "snapshot replaced");
        Ok(population as usize)
    }

    /// Inserts or replaces a single record, keyed by handle.
    ///
    /// This is the path drawing collaborators use right after creating a
    /// new live entity, keeping the snapshot eventually consistent between
    /// full rescans.
    pub fn insert_record(&self, record: &EntityRecord) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO cad_elements (handle, name, type, layer, properties)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.handle,
                record.name,
                record.entity_type,
                record.layer,
                record.properties.to_json()?,
            ],
        )?;
        Ok(())
    }

    /// Reads back the full record population, in insertion order.
    pub fn records(&self) -> StoreResult<Vec<EntityRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT handle, name, type, layer, properties FROM cad_elements ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let properties: String = row.get(4)?;
            records.push(EntityRecord {
                handle: row.get(0)?,
                name: row.get(1)?,
                entity_type: row.get(2)?,
                layer: row.get(3)?,
                properties: EntityProperties::from_json(&properties)?,
            });
        }
        Ok(records)
    }

    /// Inserts or replaces the statistics row for a pattern.
    /// Last write wins; counts are never accumulated.
    pub fn upsert_pattern_stat(&self, stat: &PatternStat) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO text_patterns (pattern, count, drawing)
             VALUES (?1, ?2, ?3)",
            params![stat.pattern, stat.count as i64, stat.drawing],
        )?;
        Ok(())
    }

    /// Reads back the statistics row for a pattern, if one exists.
    pub fn pattern_stat(&self, pattern: &str) -> StoreResult<Option<PatternStat>> {
        let stat = self
            .conn
            .query_row(
                "SELECT pattern, count, drawing FROM text_patterns WHERE pattern = ?1",
                params![pattern],
                |row| {
                    Ok(PatternStat {
                        pattern: row.get(0)?,
                        count: row.get::<_, i64>(1)? as u64,
                        drawing: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(stat)
    }

    /// Executes arbitrary caller-supplied query text.
    ///
    /// No validation is performed — query safety is the caller's
    /// responsibility by contract. Malformed or destructive statements
    /// fail with [`StoreError::Sqlite`].
    pub fn query(&self, sql: &str) -> StoreResult<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let column_count = columns.len();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(value_to_json(row.get_ref(i)?));
            }
            out.push(values);
        }
        Ok(QueryResult {
            columns,
            rows: out,
        })
    }
}

fn value_to_json(value: rusqlite::types::ValueRef<'_>) -> serde_json::Value {
    use rusqlite::types::ValueRef;
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(t) => serde_json::Value::from(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => serde_json::Value::from(String::from_utf8_lossy(b).into_owned()),
    }
}
