pub mod day_record;
pub mod slot;

pub use day_record::{format_ymd, parse_ymd, DayRecord, TimeField};
pub use slot::{default_slots, PrayerSlot};
