// tests/roundtrip.rs
//
// A snapshot written by save and re-selected by most_recent decodes to the
// exact records that were persisted — one canonical record type, no
// provenance-dependent column offsets.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use epitrack::snapshot::{MeasureRecord, RegionRecord, Snapshot, Source};
use epitrack::store::SnapshotStore;

fn dt(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn store_with_dirs(now: NaiveDateTime) -> (tempfile::TempDir, SnapshotStore) {
    let dir = tempfile::tempdir().unwrap();
    for source in Source::ALL {
        fs::create_dir_all(dir.path().join(source.dir_name())).unwrap();
    }
    let store = SnapshotStore::with_clock(dir.path(), now);
    (dir, store)
}

#[test]
fn regional_snapshot_round_trips_with_rates() {
    let (_dir, store) = store_with_dirs(dt(3, 16));

    let mut ca = RegionRecord::counts("California", 15, 1, 0);
    ca.test_rate = Some(0.25);
    ca.incidence = Some(3.5);
    let snap = Snapshot::Regional(vec![
        ca,
        RegionRecord::counts("New York", 7, 0, 2),
        // duplicate region rows survive storage as-is
        RegionRecord::counts("New York", 1, 0, 0),
    ]);

    store.save(Source::Jhu, &snap, dt(3, 15)).unwrap();
    assert_eq!(store.most_recent(Source::Jhu).unwrap(), snap);
}

#[test]
fn measure_snapshot_round_trips() {
    let (_dir, store) = store_with_dirs(dt(3, 16));

    let snap = Snapshot::Measures(vec![
        MeasureRecord::new("Positive", 12),
        MeasureRecord::new("Negative", 300),
        // commas in measure names exercise CSV quoting
        MeasureRecord::new("Pending, other", 4),
    ]);

    store.save(Source::Cdc, &snap, dt(3, 15)).unwrap();
    assert_eq!(store.most_recent(Source::Cdc).unwrap(), snap);
}

#[test]
fn saved_then_reloaded_snapshot_compares_as_not_new() {
    let (_dir, store) = store_with_dirs(dt(3, 16));

    let snap = Snapshot::Regional(vec![RegionRecord::counts("Ohio", 4, 1, 0)]);
    store.save(Source::Jhu, &snap, dt(3, 15)).unwrap();

    let reloaded = store.most_recent(Source::Jhu).unwrap();
    assert!(!Source::Jhu.rule().is_new(&snap, &reloaded).is_new);
}
