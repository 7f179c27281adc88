//! SQLite index implementation
//!
//! This module provides the durable, SQLite-backed implementation of the
//! Index trait.

use crate::content::Paragraph;
use crate::index::schema::initialize_schema;
use crate::index::tokenize::tokenize;
use crate::index::{Index, IndexResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

/// SQLite-backed term index
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Creates a new SqliteIndex instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteIndex)` - Successfully opened/created database
    /// * `Err(IndexError)` - Failed to open database
    pub fn new(path: &Path) -> IndexResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        // Initialize schema
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns the stored positions of `term` within `url`, ascending
    pub fn positions(&self, term: &str, url: &str) -> IndexResult<Vec<usize>> {
        let mut stmt = self.conn.prepare(
            "SELECT position FROM postings WHERE term = ?1 AND url = ?2 ORDER BY position",
        )?;

        let positions = stmt
            .query_map(params![term, url], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(positions.into_iter().map(|p| p as usize).collect())
    }

    /// Counts indexed pages
    pub fn page_count(&self) -> IndexResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl Index for SqliteIndex {
    fn is_indexed(&self, url: &str) -> IndexResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pages WHERE url = ?1)",
            params![url],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn index_page(&mut self, url: &str, paragraphs: &[Paragraph]) -> IndexResult<()> {
        let tx = self.conn.transaction()?;

        // Explicit replace keeps re-indexing idempotent.
        tx.execute("DELETE FROM postings WHERE url = ?1", params![url])?;
        tx.execute("DELETE FROM pages WHERE url = ?1", params![url])?;

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO pages (url, indexed_at) VALUES (?1, ?2)",
            params![url, now],
        )?;

        {
            let mut stmt =
                tx.prepare("INSERT INTO postings (term, url, position) VALUES (?1, ?2, ?3)")?;

            // One position counter across the whole page, in document order.
            let mut position: i64 = 0;
            for paragraph in paragraphs {
                for term in tokenize(&paragraph.text()) {
                    stmt.execute(params![term, url, position])?;
                    position += 1;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn get_counts(&self, term: &str) -> IndexResult<HashMap<String, usize>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, COUNT(*) FROM postings WHERE term = ?1 GROUP BY url")?;

        let rows = stmt.query_map(params![term], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = HashMap::new();
        for row in rows {
            let (url, count) = row?;
            counts.insert(url, count as usize);
        }

        Ok(counts)
    }
}
