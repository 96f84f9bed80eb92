use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, Local, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{default_slots, PrayerSlot};

fn default_base_url() -> String {
    "https://waqt.uk".to_string()
}
fn default_mosque_key() -> String {
    "shahjalal".to_string()
}
fn default_mosques() -> Vec<Mosque> {
    vec![
        Mosque::new("shahjalal", "Shahjalal Islamic Society", "shahjalal"),
        Mosque::new("quba", "Masjid Quba", "quba"),
        Mosque::new("almahad", "Al Mahad Ul Islami", "Almahad"),
    ]
}

/// A timetable page published under `{base_url}/{path}/index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mosque {
    pub key: String,
    pub name: String,
    pub path: String,
}

impl Mosque {
    pub fn new(key: &str, name: &str, path: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_mosque_key")]
    pub default_mosque: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Minutes east of UTC; system local time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i32>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_mosques")]
    pub mosques: Vec<Mosque>,
    #[serde(default = "default_slots")]
    pub slots: Vec<PrayerSlot>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_mosque: default_mosque_key(),
            base_url: default_base_url(),
            timezone_offset: None,
            cache: CacheConfig::default(),
            mosques: default_mosques(),
            slots: default_slots(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "waqt").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache.dir {
            return Ok(dir.clone());
        }
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("waqt.db"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    /// Case-insensitive lookup; `None` selects the default mosque.
    pub fn mosque(&self, key: Option<&str>) -> Result<&Mosque> {
        let wanted = key.unwrap_or(&self.default_mosque).trim().to_lowercase();
        self.mosques
            .iter()
            .find(|m| m.key.to_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = self.mosques.iter().map(|m| m.key.as_str()).collect();
                anyhow!("Unknown mosque '{}'. Known: {}", wanted, known.join(", "))
            })
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        match self.timezone_offset {
            Some(minutes) => FixedOffset::east_opt(minutes * 60)
                .ok_or_else(|| anyhow!("Invalid timezone offset: {}", minutes)),
            None => Ok(*Local::now().offset()),
        }
    }

    /// Current instant in the configured zone.
    pub fn now(&self) -> Result<DateTime<FixedOffset>> {
        Ok(Utc::now().with_timezone(&self.offset()?))
    }
}
