//! Mosque timetable reader.
//!
//! Pulls the `timetableData` literal out of a timetable page, picks today's
//! row and the next prayer, and keeps the last good row per mosque for when
//! the page cannot be fetched.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod fetch;
pub mod models;
pub mod service;
pub mod timetable;
pub mod utils;

pub use models::{DayRecord, PrayerSlot, TimeField};
pub use timetable::{extract, find_today, next_prayer_index};
