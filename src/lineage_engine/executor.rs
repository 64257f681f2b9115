//! Warehouse query execution
//!
//! The executor owns the warehouse connection for the life of one command.
//! The connection is handed in (or opened from an explicit path) rather than
//! cached process-wide, so the rest of the engine can be exercised against a
//! fake executor in tests.

use std::path::Path;

use rusqlite::Connection;

use super::graph::LineageEdge;
use super::EngineResult;

/// Runs a lineage query and maps result rows to edges.
///
/// Implementations surface execution failures (connectivity, missing tables,
/// malformed SQL) as errors; an empty result is a normal outcome, not a
/// failure. The expected result shape is two text columns: source, target.
pub trait QueryExecutor {
    fn fetch_edges(&mut self, sql: &str) -> EngineResult<Vec<LineageEdge>>;
}

/// SQLite-backed executor. SQLite's recursive CTE support covers the
/// `WITH RECURSIVE ... UNION ALL` construct the query builder emits, and
/// event timestamps stored as ISO-8601 text compare correctly under `<=`.
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Open the warehouse database at the given path.
    pub fn open(path: &Path) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database. Useful for tests; the database starts
    /// empty, so queries against it fail until log tables are created.
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl QueryExecutor for SqliteExecutor {
    fn fetch_edges(&mut self, sql: &str) -> EngineResult<Vec<LineageEdge>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(LineageEdge {
                source: row.get(0)?,
                target: row.get(1)?,
            })
        })?;

        let mut edges = Vec::new();
        for row in rows {
            edges.push(row?);
        }
        Ok(edges)
    }
}
