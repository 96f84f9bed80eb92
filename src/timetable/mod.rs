pub mod extractor;
pub mod resolver;

pub use extractor::{extract, try_extract};
pub use resolver::{find_today, minutes_until, next_prayer_index, slot_minutes};
