// src/store.rs
//
// Versioned snapshot persistence. Each source owns one subdirectory under
// the data root; every snapshot is an immutable CSV whose name embeds its
// creation stamp as `<prefix>_MM_DD_HH_MM_SS.csv` (year implicit, pinned at
// store construction). "Most recent" is computed at read time from those
// stamps; no separate index is kept.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::csv::{parse_rows, rows_to_string};
use crate::error::{Result, TrackerError};
use crate::file::write_atomic;
use crate::snapshot::{Snapshot, Source};

pub struct SnapshotStore {
    root: PathBuf,
    now: NaiveDateTime,
}

impl SnapshotStore {
    /// Store rooted at `root`, clocked at the current wall time.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Local::now().naive_local())
    }

    /// Store with a fixed clock. `now` anchors both the recency selection
    /// and the year used to interpret stored stamps.
    pub fn with_clock(root: impl Into<PathBuf>, now: NaiveDateTime) -> Self {
        Self { root: root.into(), now }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn source_dir(&self, source: Source) -> PathBuf {
        self.root.join(source.dir_name())
    }

    /// All persisted snapshot names for `source`, in directory order.
    /// Hidden OS artifacts, temp files, and auxiliary caches sharing the
    /// directory are filtered out by name. A missing directory is an empty
    /// store, not an error.
    pub fn list_snapshots(&self, source: Source) -> Result<Vec<String>> {
        let dir = self.source_dir(source);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_snapshot_name(name, source) {
                    names.push(s!(name));
                }
            }
        }
        Ok(names)
    }

    /// The most recently created snapshot for `source`, or an empty snapshot
    /// if none exist (comparators treat that as "always novel").
    ///
    /// Selection is deterministic: greatest stamp not exceeding `now` wins;
    /// if every candidate is future-dated (clock skew, restored backups),
    /// the earliest future one wins. Name order breaks exact-stamp ties.
    /// Files with unparseable stamps are skipped, not fatal.
    pub fn most_recent(&self, source: Source) -> Result<Snapshot> {
        let mut best: Option<(NaiveDateTime, String)> = None;

        for name in self.list_snapshots(source)? {
            let stamp = match parse_stamp(&name, source, self.now.year()) {
                Ok(stamp) => stamp,
                Err(e) => {
                    logd!("Store: skipping {name}: {e}");
                    continue;
                }
            };
            let candidate = (stamp, name);
            best = match best {
                None => Some(candidate),
                Some(current) => Some(select(candidate, current, self.now)),
            };
        }

        match best {
            Some((_, name)) => self.load(source, &name),
            None => Ok(Snapshot::empty(source)),
        }
    }

    /// Read and decode one stored snapshot by name.
    pub fn load(&self, source: Source, name: &str) -> Result<Snapshot> {
        let text = fs::read_to_string(self.source_dir(source).join(name))?;
        Ok(Snapshot::decode(source, parse_rows(&text, ',')))
    }

    /// Persist `snapshot` under a name embedding `stamp`. The write is
    /// atomic (temp + rename) so a concurrent or crashed cycle can never
    /// select a half-written file. The source directory must already exist;
    /// bootstrapping it is the orchestrator's job.
    pub fn save(&self, source: Source, snapshot: &Snapshot, stamp: NaiveDateTime) -> Result<PathBuf> {
        let path = self.source_dir(source).join(snapshot_name(source, stamp));
        let (headers, rows) = snapshot.encode();
        write_atomic(&path, &rows_to_string(&rows, &Some(headers), ','))?;
        Ok(path)
    }
}

/// `<prefix>_<MM>_<DD>_<HH>_<MM>_<SS>.csv`
pub fn snapshot_name(source: Source, stamp: NaiveDateTime) -> String {
    format!("{}_{}.csv", source.prefix(), stamp.format("%m_%d_%H_%M_%S"))
}

/// Parse the stamp embedded in a snapshot name, using `year` for the
/// implicit year. Rejects out-of-range components via chrono.
pub fn parse_stamp(name: &str, source: Source, year: i32) -> Result<NaiveDateTime> {
    let malformed = || TrackerError::MalformedTimestamp { name: s!(name) };

    let rest = name
        .strip_prefix(source.prefix())
        .and_then(|r| r.strip_prefix('_'))
        .and_then(|r| r.strip_suffix(".csv"))
        .ok_or_else(malformed)?;

    let parts = rest
        .split('_')
        .map(|p| p.parse::<u32>())
        .collect::<std::result::Result<Vec<u32>, _>>()
        .map_err(|_| malformed())?;

    let [month, day, hour, minute, second] = parts[..] else {
        return Err(malformed());
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(malformed)
}

fn is_snapshot_name(name: &str, source: Source) -> bool {
    if name.starts_with('.') {
        return false; // OS droppings, atomic-write temps
    }
    if name.contains("time_series") {
        return false; // aux caches share the source directory
    }
    if !name.ends_with(".csv") {
        return false;
    }
    name.strip_prefix(source.prefix())
        .is_some_and(|rest| rest.starts_with('_'))
}

/// Pick between two dated candidates relative to `now`.
fn select(
    a: (NaiveDateTime, String),
    b: (NaiveDateTime, String),
    now: NaiveDateTime,
) -> (NaiveDateTime, String) {
    let a_past = a.0 <= now;
    let b_past = b.0 <= now;
    let a_wins = match (a_past, b_past) {
        (true, false) => true,
        (false, true) => false,
        // both usable: latest wins, greatest name on equal stamps
        (true, true) => a > b,
        // both future-dated: closest to now wins, greatest name on ties
        (false, false) => match a.0.cmp(&b.0) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => a.1 > b.1,
        },
    };
    if a_wins { a } else { b }
}
