use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheGateway;
use crate::error::CacheError;
use crate::models::DayRecord;

/// One `prayer_<key>.json` file per mosque inside `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, mosque_key: &str) -> PathBuf {
        self.dir.join(format!("prayer_{}.json", file_stem(mosque_key)))
    }
}

/// Keep keys filesystem-safe; anything outside `[A-Za-z0-9_-]` becomes `_`.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() { "default".to_string() } else { stem }
}

impl CacheGateway for JsonFileCache {
    fn write(&mut self, mosque_key: &str, record: &DayRecord) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(mosque_key);
        let content = serde_json::to_string(record)?;
        fs::write(&path, content)?;
        debug!("cached {} row at {:?}", mosque_key, path);
        Ok(())
    }

    fn read(&self, mosque_key: &str) -> Result<Option<DayRecord>, CacheError> {
        let path = self.path_for(mosque_key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn clear(&mut self, mosque_key: &str) -> Result<(), CacheError> {
        let path = self.path_for(mosque_key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
