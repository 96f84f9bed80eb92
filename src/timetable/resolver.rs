use chrono::{DateTime, TimeZone, Timelike};

use crate::models::{DayRecord, PrayerSlot};

/// First record whose date equals `now`'s calendar date in its own zone.
pub fn find_today<'a, Tz: TimeZone>(
    records: &'a [DayRecord],
    now: &DateTime<Tz>,
) -> Option<&'a DayRecord> {
    let today = now.date_naive();
    records.iter().find(|r| r.date == Some(today))
}

/// Minutes since midnight of a `H:MM` clock string. Absent or unparsable
/// values count as 0, which makes the slot look already passed.
pub fn clock_minutes(value: Option<&str>, afternoon: bool) -> u32 {
    let Some((h, m)) = value.and_then(|v| v.trim().split_once(':')) else {
        return 0;
    };
    let (Ok(h), Ok(m)) = (h.trim().parse::<u32>(), m.trim().parse::<u32>()) else {
        return 0;
    };
    if h >= 24 || m >= 60 {
        return 0;
    }
    if afternoon && h < 12 {
        (h + 12) * 60 + m
    } else {
        h * 60 + m
    }
}

/// Minutes since midnight at which `slot` is compared: its jamaah column if it
/// has one, otherwise its begins column.
pub fn slot_minutes(record: &DayRecord, slot: &PrayerSlot) -> u32 {
    clock_minutes(record.time(slot.comparison_field()), slot.afternoon)
}

/// Index of the first slot still ahead of `now`, or `None` once every slot
/// for the day has passed.
pub fn next_prayer_index<Tz: TimeZone>(
    record: &DayRecord,
    now: &DateTime<Tz>,
    slots: &[PrayerSlot],
) -> Option<usize> {
    let now_mins = now.hour() * 60 + now.minute();
    slots
        .iter()
        .position(|slot| slot_minutes(record, slot) > now_mins)
}

/// Minutes from `now` until `slot` on the same day; 0 if already passed.
pub fn minutes_until<Tz: TimeZone>(record: &DayRecord, slot: &PrayerSlot, now: &DateTime<Tz>) -> u32 {
    let now_mins = now.hour() * 60 + now.minute();
    slot_minutes(record, slot).saturating_sub(now_mins)
}
