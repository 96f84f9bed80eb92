use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use std::path::{Path, PathBuf};

use waqt::cache::{CacheGateway, JsonFileCache, SqliteCache};
use waqt::config::{AppConfig, CacheBackend, Mosque};
use waqt::fetch::{FileSource, HtmlSource, HttpSource};
use waqt::models::format_ymd;
use waqt::service::{Origin, Resolution, TimetableService};
use waqt::timetable::minutes_until;
use waqt::utils::format::{format_duration_secs, format_row, show};

use crate::cli::args::CacheCommands;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Wiring ──────────────────────────────────────────────────────────────────

/// Per-invocation choices from the global flags.
pub struct RunOptions {
    pub mosque: Option<String>,
    pub file: Option<PathBuf>,
    pub at: Option<String>,
}

type Service = TimetableService<Box<dyn HtmlSource>, Box<dyn CacheGateway>>;

fn open_cache(config: &AppConfig) -> Result<Box<dyn CacheGateway>> {
    Ok(match config.cache.backend {
        CacheBackend::File => Box::new(JsonFileCache::new(config.data_dir()?)),
        CacheBackend::Sqlite => {
            let path = config.db_path()?;
            Box::new(
                SqliteCache::open(&path)
                    .with_context(|| format!("Opening cache database at {:?}", path))?,
            )
        }
    })
}

fn open_source(config: &AppConfig, opts: &RunOptions) -> Result<Box<dyn HtmlSource>> {
    Ok(match &opts.file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&config.base_url).context("Building HTTP client")?),
    })
}

fn open_service(config: &AppConfig, opts: &RunOptions) -> Result<Service> {
    Ok(TimetableService::new(
        open_source(config, opts)?,
        open_cache(config)?,
        config.slots.clone(),
    ))
}

/// `--at` in the configured zone, or the current time.
pub fn reference_time(config: &AppConfig, at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    let Some(at) = at else {
        return config.now();
    };
    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(at.trim(), fmt).ok())
        .ok_or_else(|| anyhow!("Bad --at '{}'. Use YYYY-MM-DDTHH:MM", at))?;
    config
        .offset()?
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow!("Ambiguous local time '{}'", at))
}

fn print_source_note(res: &Resolution, now: &DateTime<FixedOffset>) {
    if res.origin == Origin::Cached {
        let day = res
            .record
            .date
            .map(format_ymd)
            .unwrap_or_else(|| "unknown date".to_string());
        if res.is_stale(now.date_naive()) {
            println_colored!(AMBER, "  Offline: showing cached times from {}", day);
        } else {
            println_colored!(DIM, "  Offline: showing cached times");
        }
    }
}

// ─── Init ────────────────────────────────────────────────────────────────────

pub fn handle_init(path: &Path, reset: bool) -> Result<()> {
    if path.exists() && !reset {
        println!("  Config already exists at {:?}. Use --reset to overwrite.", path);
        return Ok(());
    }
    AppConfig::default().save_to(path)?;
    println!("  Wrote {:?}", path);
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(config: &AppConfig, opts: &RunOptions) -> Result<()> {
    let mosque = config.mosque(opts.mosque.as_deref())?;
    let now = reference_time(config, opts.at.as_deref())?;
    let mut service = open_service(config, opts)?;

    println!();
    println_colored!(GOLD, "  {} ({})", mosque.name, format_ymd(now.date_naive()));

    let Some(res) = service.resolve(mosque, &now) else {
        println!();
        println_colored!(DIM, "  No data available");
        println!();
        return Ok(());
    };
    print_source_note(&res, &now);
    println!();

    println_colored!(DIM, "  {:<10}  {:<7}  {}", "Prayer", "Begins", "Jamaah");
    for (i, slot) in service.slots().iter().enumerate() {
        let begins = show(&res.record, slot.primary);
        let jamaah = slot.iqamah.map(|f| show(&res.record, f)).unwrap_or("-");
        if res.next == Some(i) {
            println_colored!(GOLD, "▸ {:<10}  {:<7}  {}", slot.name, begins, jamaah);
        } else if res.next.is_none_or(|n| i < n) {
            println_colored!(DIM, "  {:<10}  {:<7}  {}", slot.name, begins, jamaah);
        } else {
            println_colored!(BOLD, "  {:<10}  {:<7}  {}", slot.name, begins, jamaah);
        }
    }

    println!();
    print_next(&res, service.slots(), &now);
    println!();
    Ok(())
}

fn print_next(res: &Resolution, slots: &[waqt::PrayerSlot], now: &DateTime<FixedOffset>) {
    match res.next.and_then(|i| slots.get(i)) {
        Some(slot) => {
            let mins = minutes_until(&res.record, slot, now);
            println_colored!(
                AMBER,
                "  Next: {} {} in {}",
                slot.name,
                show(&res.record, slot.comparison_field()),
                format_duration_secs(i64::from(mins) * 60)
            );
        }
        None => {
            println_colored!(DIM, "  All prayers for today have passed");
        }
    }
}

// ─── Next ────────────────────────────────────────────────────────────────────

pub fn handle_next(config: &AppConfig, opts: &RunOptions) -> Result<()> {
    let mosque = config.mosque(opts.mosque.as_deref())?;
    let now = reference_time(config, opts.at.as_deref())?;
    let mut service = open_service(config, opts)?;

    match service.resolve(mosque, &now) {
        Some(res) => {
            print_source_note(&res, &now);
            print_next(&res, service.slots(), &now);
        }
        None => println_colored!(DIM, "  No data available"),
    }
    Ok(())
}

// ─── Summary ─────────────────────────────────────────────────────────────────

pub fn handle_summary(config: &AppConfig, opts: &RunOptions) -> Result<()> {
    let now = reference_time(config, opts.at.as_deref())?;
    let mut service = open_service(config, opts)?;

    // A single page file can only describe one mosque.
    let mosques: Vec<&Mosque> = if opts.file.is_some() {
        vec![config.mosque(opts.mosque.as_deref())?]
    } else {
        config.mosques.iter().collect()
    };

    for mosque in mosques {
        let res = service.resolve(mosque, &now);
        let record = res
            .as_ref()
            .filter(|r| !r.is_stale(now.date_naive()))
            .map(|r| &r.record);
        println!("{}", format_row(&mosque.name, record));
    }
    Ok(())
}

// ─── Mosques ─────────────────────────────────────────────────────────────────

pub fn handle_mosques(config: &AppConfig) -> Result<()> {
    println!();
    for m in &config.mosques {
        let marker = if m.key.eq_ignore_ascii_case(&config.default_mosque) { "*" } else { " " };
        println!(
            "  {} {:<12}  {:<28}  {}/{}/index.html",
            marker,
            m.key,
            m.name,
            config.base_url.trim_end_matches('/'),
            m.path
        );
    }
    println!();
    Ok(())
}

// ─── Cache ───────────────────────────────────────────────────────────────────

pub fn handle_cache(config: &AppConfig, opts: &RunOptions, action: &CacheCommands) -> Result<()> {
    let mosque = config.mosque(opts.mosque.as_deref())?;
    let mut cache = open_cache(config)?;

    match action {
        CacheCommands::Show => match cache.read(&mosque.key)? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println_colored!(DIM, "  No cached row for {}", mosque.key),
        },
        CacheCommands::Clear => {
            cache.clear(&mosque.key)?;
            println!("  Cleared cached row for {}", mosque.key);
        }
    }
    Ok(())
}
