use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::cache::CacheGateway;
use crate::db::migrations::run_migrations;
use crate::error::CacheError;
use crate::models::{format_ymd, DayRecord};

/// Rows kept in the `record_cache` table, one per mosque key.
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    pub fn open(path: &Path) -> Result<Self, CacheError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, CacheError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, CacheError> {
        run_migrations(&conn)?;
        Ok(Self { conn })
    }
}

impl CacheGateway for SqliteCache {
    fn write(&mut self, mosque_key: &str, record: &DayRecord) -> Result<(), CacheError> {
        let payload = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO record_cache (mosque_key, date, payload, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(mosque_key) DO UPDATE
             SET date = ?2, payload = ?3, updated_at = datetime('now')",
            params![mosque_key, record.date.map(format_ymd), payload],
        )?;
        Ok(())
    }

    fn read(&self, mosque_key: &str) -> Result<Option<DayRecord>, CacheError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM record_cache WHERE mosque_key = ?1",
                params![mosque_key],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            None => Ok(None),
            Some(p) => Ok(Some(serde_json::from_str(&p)?)),
        }
    }

    fn clear(&mut self, mosque_key: &str) -> Result<(), CacheError> {
        self.conn.execute(
            "DELETE FROM record_cache WHERE mosque_key = ?1",
            params![mosque_key],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, isha: &str) -> DayRecord {
        DayRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, day),
            j_isha: Some(isha.into()),
            ..Default::default()
        }
    }

    #[test]
    fn upsert_replaces_row() {
        let mut cache = SqliteCache::in_memory().unwrap();
        cache.write("quba", &record(18, "7:45")).unwrap();
        cache.write("quba", &record(19, "7:50")).unwrap();
        assert_eq!(cache.read("quba").unwrap(), Some(record(19, "7:50")));
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = SqliteCache::in_memory().unwrap();
        cache.write("quba", &record(18, "7:45")).unwrap();
        assert_eq!(cache.read("almahad").unwrap(), None);
        cache.clear("quba").unwrap();
        assert_eq!(cache.read("quba").unwrap(), None);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        {
            let mut cache = SqliteCache::open(&path).unwrap();
            cache.write("shahjalal", &record(18, "7:45")).unwrap();
        }
        let cache = SqliteCache::open(&path).unwrap();
        assert_eq!(cache.read("shahjalal").unwrap(), Some(record(18, "7:45")));
    }
}
