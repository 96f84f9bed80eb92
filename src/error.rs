//! Error types for the library side. The CLI wraps these in `anyhow`.

use std::io;
use thiserror::Error;

/// Why a page produced no timetable rows.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no timetableData literal found in page")]
    MarkerNotFound,

    #[error("timetable literal is not valid after repair: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Cached record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
