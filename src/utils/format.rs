use crate::models::{DayRecord, TimeField};

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Clock value as shown on the page, or "-" when absent.
pub fn show(record: &DayRecord, field: TimeField) -> &str {
    record.time(field).unwrap_or("-")
}

/// One line per mosque, e.g.
/// `Quba: Sehri 5:22, Fajr 5:44 (Jamaah 6:00), Sunrise 7:20, ...`
pub fn format_row(name: &str, record: Option<&DayRecord>) -> String {
    let Some(r) = record else {
        return format!("{}: No data for today", name);
    };
    let mut s = format!(
        "{}: Sehri {}, Fajr {} (Jamaah {})",
        name,
        show(r, TimeField::Sehri),
        show(r, TimeField::Fajr),
        show(r, TimeField::JFajr)
    );
    s.push_str(&format!(", Sunrise {}", show(r, TimeField::Sunrise)));
    s.push_str(&format!(
        ", Zuhr {} (Jamaah {})",
        show(r, TimeField::Zuhr),
        show(r, TimeField::JZuhr)
    ));
    s.push_str(&format!(
        ", Asr {} (Jamaah {})",
        show(r, TimeField::Asr),
        show(r, TimeField::JAsr)
    ));
    s.push_str(&format!(", Maghrib {}", show(r, TimeField::Maghrib)));
    s.push_str(&format!(
        ", Isha {} (Jamaah {})",
        show(r, TimeField::Isha),
        show(r, TimeField::JIsha)
    ));
    if let Some(no) = r.no.filter(|n| *n > 0) {
        s.push_str(&format!(", Ramadan Day {}", no));
    }
    s
}
