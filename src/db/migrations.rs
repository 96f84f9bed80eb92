use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS record_cache (
            mosque_key  TEXT PRIMARY KEY,
            date        TEXT,
            payload     TEXT NOT NULL,
            updated_at  TEXT DEFAULT (datetime('now'))
        );
    ")?;
    Ok(())
}
