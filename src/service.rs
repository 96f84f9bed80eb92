//! Live page first, cached row second.

use chrono::{DateTime, NaiveDate, TimeZone};
use log::{info, warn};

use crate::cache::CacheGateway;
use crate::config::Mosque;
use crate::fetch::HtmlSource;
use crate::models::{DayRecord, PrayerSlot};
use crate::timetable::{extract, find_today, next_prayer_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Live,
    Cached,
}

/// Today's row for a mosque and the slot to highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub record: DayRecord,
    /// `None` once every slot for the day has passed.
    pub next: Option<usize>,
    pub origin: Origin,
}

impl Resolution {
    /// A cached row that belongs to another day.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.record.date != Some(today)
    }
}

pub struct TimetableService<S, C> {
    source: S,
    cache: C,
    slots: Vec<PrayerSlot>,
}

impl<S: HtmlSource, C: CacheGateway> TimetableService<S, C> {
    pub fn new(source: S, cache: C, slots: Vec<PrayerSlot>) -> Self {
        Self {
            source,
            cache,
            slots,
        }
    }

    pub fn slots(&self) -> &[PrayerSlot] {
        &self.slots
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Today's row from the page, or `None` if the fetch failed, the page had
    /// no usable literal, or no row carries today's date.
    pub fn live_record<Tz: TimeZone>(&self, mosque: &Mosque, now: &DateTime<Tz>) -> Option<DayRecord> {
        let html = match self.source.fetch(mosque) {
            Ok(html) => html,
            Err(e) => {
                warn!("fetching {} failed: {}", mosque.key, e);
                return None;
            }
        };
        let records = extract(&html);
        if records.is_empty() {
            warn!("no timetable rows in page for {}", mosque.key);
            return None;
        }
        let today = find_today(&records, now).cloned();
        if today.is_none() {
            warn!("{} has no row for {}", mosque.key, now.date_naive());
        }
        today
    }

    pub fn resolve<Tz: TimeZone>(&mut self, mosque: &Mosque, now: &DateTime<Tz>) -> Option<Resolution> {
        let (record, origin) = match self.live_record(mosque, now) {
            Some(record) => {
                if !record.is_complete(&self.slots) {
                    warn!("{} row for today is missing prayer times", mosque.key);
                }
                if let Err(e) = self.cache.write(&mosque.key, &record) {
                    warn!("caching {} failed: {}", mosque.key, e);
                }
                (record, Origin::Live)
            }
            None => match self.cache.read(&mosque.key) {
                Ok(Some(record)) => {
                    info!("using cached row for {}", mosque.key);
                    (record, Origin::Cached)
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!("reading cache for {} failed: {}", mosque.key, e);
                    return None;
                }
            },
        };

        let next = next_prayer_index(&record, now, &self.slots);
        Some(Resolution {
            record,
            next,
            origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    use crate::cache::MemoryCache;
    use crate::error::FetchError;
    use crate::models::default_slots;

    struct StaticPage(Option<&'static str>);

    impl HtmlSource for StaticPage {
        fn fetch(&self, _mosque: &Mosque) -> Result<String, FetchError> {
            match self.0 {
                Some(html) => Ok(html.to_string()),
                None => Err(FetchError::Io(std::io::Error::other("offline"))),
            }
        }
    }

    const PAGE: &str = "const timetableData = [\n { date: [2026, 2, 18], fajr: \"5:44\", jFajr: \"6:00\", zuhr: \"12:35\", jZuhr: \"1:15\", asr: \"3:45\", jAsr: \"4:00\", maghrib: \"5:26\", isha: \"7:30\", jIsha: \"7:45\" },\n];\n";

    fn quba() -> Mosque {
        Mosque::new("quba", "Masjid Quba", "quba")
    }

    fn at(day: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 2, day, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn live_row_is_cached() {
        let mut svc = TimetableService::new(StaticPage(Some(PAGE)), MemoryCache::new(), default_slots());
        let res = svc.resolve(&quba(), &at(18, 14)).unwrap();
        assert_eq!(res.origin, Origin::Live);
        assert_eq!(res.next, Some(2));
        assert_eq!(svc.cache().read("quba").unwrap(), Some(res.record));
    }

    #[test]
    fn offline_falls_back_to_cache() {
        let mut cache = MemoryCache::new();
        let cached = DayRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 17),
            j_isha: Some("7:40".into()),
            ..Default::default()
        };
        cache.write("quba", &cached).unwrap();

        let mut svc = TimetableService::new(StaticPage(None), cache, default_slots());
        let res = svc.resolve(&quba(), &at(18, 9)).unwrap();
        assert_eq!(res.origin, Origin::Cached);
        assert_eq!(res.record, cached);
        assert_eq!(res.next, Some(4));
        assert!(res.is_stale(NaiveDate::from_ymd_opt(2026, 2, 18).unwrap()));
    }

    #[test]
    fn missing_today_falls_back_to_cache() {
        let mut cache = MemoryCache::new();
        let cached = DayRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 20),
            ..Default::default()
        };
        cache.write("quba", &cached).unwrap();
        let mut svc = TimetableService::new(StaticPage(Some(PAGE)), cache, default_slots());
        let res = svc.resolve(&quba(), &at(20, 9)).unwrap();
        assert_eq!(res.origin, Origin::Cached);
        assert_eq!(res.next, None);
    }

    #[test]
    fn nothing_anywhere_is_none() {
        let mut svc = TimetableService::new(StaticPage(Some("<html></html>")), MemoryCache::new(), default_slots());
        assert!(svc.resolve(&quba(), &at(18, 9)).is_none());
        assert!(svc.cache().is_empty());
    }
}
