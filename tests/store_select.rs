// tests/store_select.rs
//
// Most-recent selection and listing hygiene for the snapshot store.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use epitrack::snapshot::{RegionRecord, Snapshot, Source};
use epitrack::store::{SnapshotStore, snapshot_name};

fn dt(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn regional(cases: u64) -> Snapshot {
    Snapshot::Regional(vec![RegionRecord::counts("California", cases, 0, 0)])
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
fn most_recent_picks_latest_snapshot_not_exceeding_now() {
    let (_dir, store) = store_with_dirs(dt(3, 16));

    store.save(Source::Jhu, &regional(1), dt(3, 1)).unwrap();
    store.save(Source::Jhu, &regional(2), dt(3, 15)).unwrap();

    assert_eq!(store.most_recent(Source::Jhu).unwrap(), regional(2));
}

#[test]
fn future_dated_snapshots_lose_to_past_ones() {
    let (_dir, store) = store_with_dirs(dt(3, 16));

    store.save(Source::Jhu, &regional(1), dt(3, 15)).unwrap();
    store.save(Source::Jhu, &regional(9), dt(3, 20)).unwrap();

    assert_eq!(store.most_recent(Source::Jhu).unwrap(), regional(1));
}

#[test]
fn all_future_dated_picks_the_earliest() {
    let (_dir, store) = store_with_dirs(dt(3, 16));

    store.save(Source::Jhu, &regional(5), dt(3, 18)).unwrap();
    store.save(Source::Jhu, &regional(9), dt(3, 25)).unwrap();

    assert_eq!(store.most_recent(Source::Jhu).unwrap(), regional(5));
}

#[test]
fn empty_store_yields_empty_snapshot_not_an_error() {
    // directories exist but hold nothing
    let (_dir, store) = store_with_dirs(dt(3, 16));
    let snap = store.most_recent(Source::Jhu).unwrap();
    assert!(snap.is_empty());

    // no directory at all is also an empty store
    let missing = SnapshotStore::with_clock("/nonexistent/epitrack-test", dt(3, 16));
    assert!(missing.most_recent(Source::Cdc).unwrap().is_empty());
}

#[test]
fn malformed_names_are_skipped_not_fatal() {
    let (dir, store) = store_with_dirs(dt(3, 16));
    let jhu = dir.path().join(Source::Jhu.dir_name());

    fs::write(jhu.join("jhu_not_a_timestamp.csv"), "state,cases\n").unwrap();
    store.save(Source::Jhu, &regional(3), dt(3, 10)).unwrap();

    assert_eq!(store.most_recent(Source::Jhu).unwrap(), regional(3));

    // only malformed names present → behaves like an empty store
    let cdc = dir.path().join(Source::Cdc.dir_name());
    fs::write(cdc.join("cdc_bogus.csv"), "measure,counts\n").unwrap();
    assert!(store.most_recent(Source::Cdc).unwrap().is_empty());
}

#[test]
fn housekeeping_files_are_not_listed() {
    let (dir, store) = store_with_dirs(dt(3, 16));
    let jhu = dir.path().join(Source::Jhu.dir_name());

    fs::write(jhu.join(".DS_Store"), "junk").unwrap();
    fs::write(jhu.join("jhu_time_series.csv"), "state,cases\n").unwrap();
    fs::write(jhu.join("notes.txt"), "junk").unwrap();
    store.save(Source::Jhu, &regional(4), dt(3, 12)).unwrap();

    let names = store.list_snapshots(Source::Jhu).unwrap();
    assert_eq!(names, vec![snapshot_name(Source::Jhu, dt(3, 12))]);
}

#[test]
fn sources_do_not_see_each_others_snapshots() {
    let (_dir, store) = store_with_dirs(dt(3, 16));
    store.save(Source::Jhu, &regional(1), dt(3, 10)).unwrap();
    assert!(store.list_snapshots(Source::Cdc).unwrap().is_empty());
}

#[test]
fn save_fails_when_source_dir_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    // no jhu_data/ created on purpose
    let store = SnapshotStore::with_clock(dir.path(), dt(3, 16));
    assert!(store.save(Source::Jhu, &regional(1), dt(3, 10)).is_err());
}

#[test]
fn save_embeds_the_stamp_in_the_name() {
    let (dir, store) = store_with_dirs(dt(3, 16));
    let stamp = NaiveDate::from_ymd_opt(2020, 3, 15)
        .unwrap()
        .and_hms_opt(9, 30, 5)
        .unwrap();

    let path = store.save(Source::Cdc, &Snapshot::empty(Source::Cdc), stamp).unwrap();
    assert_eq!(
        path,
        dir.path().join("cdc_data").join("cdc_03_15_09_30_05.csv")
    );
    assert!(path.exists());
}
