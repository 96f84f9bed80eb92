//! Pulls the `timetableData` array literal out of a timetable page.
//!
//! The literal is JavaScript, not JSON: keys are bare identifiers, dates are
//! `[Y, M, D]` arrays, rows may carry `//` comments and the generator leaves a
//! trailing comma after the last row. A fixed sequence of text repairs turns it
//! into JSON. The repairs are purely textual, so a string value containing
//! `//`, `{key:` or `,]` will be mangled; pages are produced by our own
//! generator and never contain such values.

use log::{debug, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::ExtractError;
use crate::models::DayRecord;

static LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:const|let|var)\s+timetableData\s*=\s*\[([\s\S]*?)\]\s*;[ \t]*(?:\r?\n|$)")
        .expect("literal pattern")
});
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)//.*$").expect("comment pattern"));
static DATE_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<key>\bdate"?\s*:)\s*\[\s*(?P<y>\d+)\s*,\s*(?P<m>\d+)\s*,\s*(?P<d>\d+)\s*\]"#)
        .expect("date pattern")
});
static BARE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,])\s*(\w+)\s*:").expect("key pattern"));
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[\]}])").expect("trailing comma pattern"));

/// Body of the `timetableData` array (without the outer brackets).
pub fn find_literal(html: &str) -> Option<&str> {
    LITERAL
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite an array body into a JSON array. Order matters: comments go first
/// so commented-out keys are not quoted, dates before keys so the date arrays
/// are already strings.
pub fn repair_literal(body: &str) -> String {
    let text = LINE_COMMENT.replace_all(body, "");
    let text = DATE_ARRAY.replace_all(&text, r#"${key} "${y}-${m}-${d}""#);
    let text = BARE_KEY.replace_all(&text, r#"${1}"${2}":"#);
    let wrapped = format!("[{}]", text);
    TRAILING_COMMA.replace_all(&wrapped, "${1}").into_owned()
}

pub fn try_extract(html: &str) -> Result<Vec<DayRecord>, ExtractError> {
    let body = find_literal(html).ok_or(ExtractError::MarkerNotFound)?;
    let json = repair_literal(body);

    let rows: Vec<Value> = serde_json::from_str(&json)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        if !row.is_object() {
            warn!("timetable row {} is not an object, skipping", i);
            continue;
        }
        match serde_json::from_value::<DayRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) => warn!("timetable row {} skipped: {}", i, e),
        }
    }
    debug!("extracted {} timetable rows", records.len());
    Ok(records)
}

/// Total version of [`try_extract`]: any failure yields an empty sequence.
pub fn extract(html: &str) -> Vec<DayRecord> {
    match try_extract(html) {
        Ok(records) => records,
        Err(e) => {
            debug!("timetable extraction failed: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::TimeField;

    const PAGE: &str = r#"<html><head><script>
        const timetableData = [
            { date: [2026, 2, 18], day: "Wed", no: 1, sehri: "5:22", fajr: "5:44", sunrise: "7:20", zuhr: "12:35", asr: "3:45", isha: "7:30", jFajr: "6:00", jZuhr: "1:15", jAsr: "4:00", maghrib: "5:26", jIsha: "7:45" },
            // second day of Ramadan
            { date: [2026, 2, 19], day: "Thu", no: 2, sehri: "5:20", fajr: "5:42", jFajr: "6:00" }, // jamaah unchanged
        ];
        function render() {}
    </script></head></html>"#;

    #[test]
    fn extracts_generator_page_with_trailing_comma() {
        let rows = extract(PAGE);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 2, 18));
        assert_eq!(rows[0].no, Some(1));
        assert_eq!(rows[0].time(TimeField::JIsha), Some("7:45"));
        assert_eq!(rows[1].day.as_deref(), Some("Thu"));
        assert_eq!(rows[1].time(TimeField::JFajr), Some("6:00"));
    }

    #[test]
    fn date_array_becomes_unpadded_string() {
        let repaired = repair_literal(r#"{ date: [2026, 2, 18], fajr: "5:44" }"#);
        assert_eq!(repaired, r#"[{"date": "2026-2-18","fajr": "5:44" }]"#);
    }

    #[test]
    fn clock_values_are_not_treated_as_keys() {
        let repaired = repair_literal(r#"{ fajr: "5:44",isha: "7:30" }"#);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value[0]["fajr"], "5:44");
        assert_eq!(value[0]["isha"], "7:30");
    }

    #[test]
    fn already_quoted_keys_survive() {
        let page = "const timetableData = [{\"date\": [2026, 3, 1], \"fajr\": \"5:01\"}];\n";
        let rows = extract(page);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn odd_date_shape_passes_through() {
        let page = "const timetableData = [{ date: \"18 Feb\", fajr: \"5:44\" }];\n";
        let rows = extract(page);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].time(TimeField::Fajr), Some("5:44"));
    }

    #[test]
    fn missing_marker_is_reported() {
        assert!(matches!(
            try_extract("<html><body>No timetable</body></html>"),
            Err(ExtractError::MarkerNotFound)
        ));
        assert!(extract("<html></html>").is_empty());
    }

    #[test]
    fn missing_closing_bracket_yields_nothing() {
        let page = "const timetableData = [\n { date: [2026, 2, 18], fajr: \"5:44\" },\n";
        assert!(extract(page).is_empty());
    }

    #[test]
    fn undecodable_literal_is_a_decode_error() {
        let page = "const timetableData = [ { fajr: 5:44 } ];\n";
        assert!(matches!(try_extract(page), Err(ExtractError::Decode(_))));
        assert!(extract(page).is_empty());
    }

    #[test]
    fn non_object_rows_are_skipped() {
        let page = "const timetableData = [ 1, { fajr: \"5:44\" }, \"x\" ];\n";
        let rows = extract(page);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn literal_at_end_of_input_is_found() {
        let page = "let timetableData = [{ fajr: \"5:44\" }];";
        assert_eq!(extract(page).len(), 1);
    }

    #[test]
    fn extraction_is_repeatable() {
        assert_eq!(extract(PAGE), extract(PAGE));
    }
}
