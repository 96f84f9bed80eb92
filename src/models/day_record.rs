use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Named time columns of a timetable row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeField {
    #[serde(rename = "sehri")]
    Sehri,
    #[serde(rename = "fajr")]
    Fajr,
    #[serde(rename = "jFajr")]
    JFajr,
    #[serde(rename = "sunrise")]
    Sunrise,
    #[serde(rename = "zuhr", alias = "dhuhr")]
    Zuhr,
    #[serde(rename = "jZuhr", alias = "jZuhl")]
    JZuhr,
    #[serde(rename = "asr")]
    Asr,
    #[serde(rename = "jAsr")]
    JAsr,
    #[serde(rename = "maghrib")]
    Maghrib,
    #[serde(rename = "jMaghrib")]
    JMaghrib,
    #[serde(rename = "isha")]
    Isha,
    #[serde(rename = "jIsha")]
    JIsha,
}

impl TimeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeField::Sehri => "sehri",
            TimeField::Fajr => "fajr",
            TimeField::JFajr => "jFajr",
            TimeField::Sunrise => "sunrise",
            TimeField::Zuhr => "zuhr",
            TimeField::JZuhr => "jZuhr",
            TimeField::Asr => "asr",
            TimeField::JAsr => "jAsr",
            TimeField::Maghrib => "maghrib",
            TimeField::JMaghrib => "jMaghrib",
            TimeField::Isha => "isha",
            TimeField::JIsha => "jIsha",
        }
    }
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One calendar day of a mosque timetable.
///
/// Field names follow the page's own keys so a cached record has the same
/// shape as a row of the embedded literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// `None` when the page's date value had no recognisable shape.
    #[serde(
        default,
        with = "record_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    /// Ramadan day count, only present during the fasting month.
    #[serde(default, deserialize_with = "lenient_ordinal", skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub sehri: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub fajr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub j_fajr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub zuhr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub j_zuhr: Option<String>,
    /// Older pages misspell the Zuhr jamaah key.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub j_zuhl: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub asr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub j_asr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub maghrib: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub j_maghrib: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub isha: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub j_isha: Option<String>,
}

impl DayRecord {
    /// Raw clock string for `field`, or `None` if absent or blank.
    pub fn time(&self, field: TimeField) -> Option<&str> {
        let value = match field {
            TimeField::Sehri => self.sehri.as_deref(),
            TimeField::Fajr => self.fajr.as_deref(),
            TimeField::JFajr => self.j_fajr.as_deref(),
            TimeField::Sunrise => self.sunrise.as_deref(),
            TimeField::Zuhr => self.zuhr.as_deref(),
            TimeField::JZuhr => non_blank(self.j_zuhr.as_deref()).or(self.j_zuhl.as_deref()),
            TimeField::Asr => self.asr.as_deref(),
            TimeField::JAsr => self.j_asr.as_deref(),
            TimeField::Maghrib => self.maghrib.as_deref(),
            TimeField::JMaghrib => self.j_maghrib.as_deref(),
            TimeField::Isha => self.isha.as_deref(),
            TimeField::JIsha => self.j_isha.as_deref(),
        };
        non_blank(value)
    }

    /// True when every field the slots read resolves to a non-empty string.
    pub fn is_complete(&self, slots: &[crate::models::PrayerSlot]) -> bool {
        slots
            .iter()
            .all(|slot| self.time(slot.comparison_field()).is_some() && self.time(slot.primary).is_some())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse `Y-M-D` without requiring zero padding.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('-').map(|p| p.trim().parse::<i32>());
    let (Some(Ok(y)), Some(Ok(m)), Some(Ok(d)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    NaiveDate::from_ymd_opt(y, u32::try_from(m).ok()?, u32::try_from(d).ok()?)
}

/// `Y-M-D` with no zero padding, the key format the pages use.
pub fn format_ymd(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

mod record_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&format_ymd(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::String(s) => parse_ymd(&s),
            Value::Array(parts) => match parts.as_slice() {
                [y, m, d] => match (y.as_i64(), m.as_u64(), d.as_u64()) {
                    (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(
                        i32::try_from(y).unwrap_or(i32::MIN),
                        u32::try_from(m).unwrap_or(0),
                        u32::try_from(d).unwrap_or(0),
                    ),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_ordinal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
