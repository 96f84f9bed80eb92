pub mod settings;

pub use settings::{AppConfig, CacheBackend, CacheConfig, Mosque};
