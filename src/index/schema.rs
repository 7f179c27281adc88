//! Database schema definitions for the SQLite index
//!
//! This module contains all SQL schema definitions for the Wiki-Ripple
//! term index database.

/// SQL schema for the index database
pub const SCHEMA_SQL: &str = r#"
-- Indexed pages
CREATE TABLE IF NOT EXISTS pages (
    url TEXT PRIMARY KEY,
    indexed_at TEXT NOT NULL
);

-- Term positions per page
CREATE TABLE IF NOT EXISTS postings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    term TEXT NOT NULL,
    url TEXT NOT NULL REFERENCES pages(url) ON DELETE CASCADE,
    position INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_postings_term ON postings(term);
CREATE INDEX IF NOT EXISTS idx_postings_url ON postings(url);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
