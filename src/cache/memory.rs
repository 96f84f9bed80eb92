use std::collections::HashMap;

use crate::cache::CacheGateway;
use crate::error::CacheError;
use crate::models::DayRecord;

/// Process-local cache, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, DayRecord>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheGateway for MemoryCache {
    fn write(&mut self, mosque_key: &str, record: &DayRecord) -> Result<(), CacheError> {
        self.entries.insert(mosque_key.to_string(), record.clone());
        Ok(())
    }

    fn read(&self, mosque_key: &str) -> Result<Option<DayRecord>, CacheError> {
        Ok(self.entries.get(mosque_key).cloned())
    }

    fn clear(&mut self, mosque_key: &str) -> Result<(), CacheError> {
        self.entries.remove(mosque_key);
        Ok(())
    }
}
