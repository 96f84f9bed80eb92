use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{fixture, isolated, waqt};

#[test]
fn times_from_page_file() {
    let dir = tempfile::tempdir().unwrap();

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "quba", "--file", &fixture("quba.html").to_string_lossy(), "--at", "2026-02-19T14:00", "times"])
        .assert()
        .success()
        .stdout(contains("Masjid Quba (2026-2-19)"))
        .stdout(contains("Next: Asr 4:00 in 2h 0m"))
        .stdout(contains("Offline").not());
}

#[test]
fn offline_run_uses_cached_row() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.html");

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "quba", "--file", &fixture("quba.html").to_string_lossy(), "--at", "2026-02-19T14:00", "next"])
        .assert()
        .success();

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "quba", "--file", &missing.to_string_lossy(), "--at", "2026-02-20T21:00", "times"])
        .assert()
        .success()
        .stdout(contains("showing cached times from 2026-2-19"))
        .stdout(contains("All prayers for today have passed"));

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "quba", "cache", "show"])
        .assert()
        .success()
        .stdout(contains("\"date\": \"2026-2-19\""))
        .stdout(contains("\"jIsha\": \"7:45\""));
}

#[test]
fn no_page_and_no_cache() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.html");

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "quba", "--file", &missing.to_string_lossy(), "--at", "2026-02-19T14:00", "times"])
        .assert()
        .success()
        .stdout(contains("No data available"));
}

#[test]
fn summary_line_for_page_file() {
    let dir = tempfile::tempdir().unwrap();

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "quba", "--file", &fixture("quba.html").to_string_lossy(), "--at", "2026-02-19T08:00", "summary"])
        .assert()
        .success()
        .stdout(contains(
            "Masjid Quba: Sehri 5:20, Fajr 5:42 (Jamaah 6:00), Sunrise 7:18, Zuhr 12:35 (Jamaah 1:15)",
        ))
        .stdout(contains("Ramadan Day 2"));
}

#[test]
fn unknown_mosque_fails() {
    let dir = tempfile::tempdir().unwrap();

    waqt()
        .args(isolated(&dir))
        .args(["--mosque", "nowhere", "--file", &fixture("quba.html").to_string_lossy(), "times"])
        .assert()
        .failure()
        .stderr(contains("Unknown mosque 'nowhere'"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    waqt()
        .args(["--config", &config.to_string_lossy(), "init"])
        .assert()
        .success()
        .stdout(contains("Wrote"));

    let text = std::fs::read_to_string(&config).unwrap();
    assert!(text.contains("default_mosque = \"shahjalal\""));

    waqt()
        .args(["--config", &config.to_string_lossy(), "init"])
        .assert()
        .success()
        .stdout(contains("already exists"));
}
