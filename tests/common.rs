#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use std::path::PathBuf;

pub fn waqt() -> Command {
    cargo_bin_cmd!("waqt")
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Args that keep a run away from the user's config and cache.
pub fn isolated(dir: &tempfile::TempDir) -> Vec<String> {
    vec![
        "--config".to_string(),
        dir.path().join("config.toml").to_string_lossy().to_string(),
        "--cache-dir".to_string(),
        dir.path().join("cache").to_string_lossy().to_string(),
    ]
}
