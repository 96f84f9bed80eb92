//! Last-good timetable row per mosque, read only when the live page fails.

pub mod file;
pub mod memory;
pub mod sqlite;

use crate::error::CacheError;
use crate::models::DayRecord;

pub use file::JsonFileCache;
pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

/// Storage for the most recent resolved row of each mosque. Writes replace
/// whatever was stored under the key.
pub trait CacheGateway {
    fn write(&mut self, mosque_key: &str, record: &DayRecord) -> Result<(), CacheError>;
    fn read(&self, mosque_key: &str) -> Result<Option<DayRecord>, CacheError>;
    fn clear(&mut self, mosque_key: &str) -> Result<(), CacheError>;
}

impl<C: CacheGateway + ?Sized> CacheGateway for Box<C> {
    fn write(&mut self, mosque_key: &str, record: &DayRecord) -> Result<(), CacheError> {
        (**self).write(mosque_key, record)
    }

    fn read(&self, mosque_key: &str) -> Result<Option<DayRecord>, CacheError> {
        (**self).read(mosque_key)
    }

    fn clear(&mut self, mosque_key: &str) -> Result<(), CacheError> {
        (**self).clear(mosque_key)
    }
}
