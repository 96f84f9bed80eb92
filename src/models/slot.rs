use serde::{Deserialize, Serialize};

use crate::models::TimeField;

/// One entry of the ordered prayer list used to pick the next prayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSlot {
    pub name: String,
    /// Begins (adhan) time column.
    pub primary: TimeField,
    /// Jamaah column; when set it is the one compared against the clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iqamah: Option<TimeField>,
    /// Clock strings carry no AM/PM, so hours below 12 are shifted by 12h.
    #[serde(default)]
    pub afternoon: bool,
}

impl PrayerSlot {
    pub fn new(name: &str, primary: TimeField, iqamah: Option<TimeField>, afternoon: bool) -> Self {
        Self {
            name: name.to_string(),
            primary,
            iqamah,
            afternoon,
        }
    }

    pub fn comparison_field(&self) -> TimeField {
        self.iqamah.unwrap_or(self.primary)
    }
}

/// Fajr, Dhuhr, Asr, Maghrib, Isha with their jamaah columns.
pub fn default_slots() -> Vec<PrayerSlot> {
    vec![
        PrayerSlot::new("Fajr", TimeField::Fajr, Some(TimeField::JFajr), false),
        PrayerSlot::new("Dhuhr", TimeField::Zuhr, Some(TimeField::JZuhr), true),
        PrayerSlot::new("Asr", TimeField::Asr, Some(TimeField::JAsr), true),
        PrayerSlot::new("Maghrib", TimeField::Maghrib, None, true),
        PrayerSlot::new("Isha", TimeField::Isha, Some(TimeField::JIsha), true),
    ]
}
