// src/runner.rs
//
// Orchestrator: one fetch → one comparison → one optional persist per
// polling cycle, strictly sequential. The outcome of every cycle travels
// back up as a value; nothing in the pipeline mutates shared flags.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::compare::Verdict;
use crate::error::Result;
use crate::file::ensure_directory;
use crate::params::{LOGS_DIR, Params};
use crate::scrape;
use crate::snapshot::{Snapshot, Source};
use crate::store::SnapshotStore;

/// Optional progress sink for the frontend (CLI: print lines).
pub trait Progress {
    fn log(&mut self, _msg: &str) {}
    fn update_status(&mut self, _msg: &str) {}
}

/// A no-op progress sink you can pass when you don't care.
pub struct NullProgress;
impl Progress for NullProgress {}

/// What one fetch/compare/persist pass produced.
pub struct CycleOutcome {
    pub source: Source,
    pub snapshot: Snapshot,
    pub verdict: Verdict,
    /// Path written on novelty, `None` when the fetch was stale.
    pub saved: Option<PathBuf>,
}

/// Run a single cycle for one source: fetch, compare against the most
/// recent stored snapshot, persist on novelty.
pub fn run_cycle(
    store: &SnapshotStore,
    source: Source,
    progress: &mut dyn Progress,
) -> Result<CycleOutcome> {
    let snapshot = scrape::fetch(source)?;
    let previous = store.most_recent(source)?;
    let verdict = source.rule().is_new(&snapshot, &previous);

    let saved = if verdict.is_new {
        let stamp = Local::now().naive_local();
        let path = store.save(source, &snapshot, stamp)?;
        logf!("{}: found new data, saved {}", source.prefix(), path.display());
        progress.log(&format!(
            "Found new {} data! Saved {}",
            source.prefix(),
            path.display()
        ));
        Some(path)
    } else {
        logf!("{}: downloaded data is not new, will not save", source.prefix());
        None
    };

    Ok(CycleOutcome { source, snapshot, verdict, saved })
}

fn report_delta(outcome: &CycleOutcome, progress: &mut dyn Progress) {
    let Some(delta) = &outcome.verdict.delta else { return };
    if delta.is_empty() {
        return;
    }
    if !delta.cases.is_empty() {
        progress.log(&format!("Cases rose in: {}", delta.cases.join(", ")));
    }
    if !delta.deaths.is_empty() {
        progress.log(&format!("Deaths rose in: {}", delta.deaths.join(", ")));
    }
    if !delta.recoveries.is_empty() {
        progress.log(&format!("Recoveries rose in: {}", delta.recoveries.join(", ")));
    }
}

/// Polling loop. A failed cycle is logged and retried next interval; `stop`
/// aborts the current sleep promptly and exits cleanly (saves are atomic,
/// so stopping mid-cycle never leaves a partial snapshot).
pub fn run(params: &Params, progress: &mut dyn Progress, stop: &AtomicBool) -> Result<()> {
    bootstrap(params)?;
    logf!("Starting tracker loop");

    loop {
        let store = SnapshotStore::new(&params.data_dir);

        for &source in &params.sources {
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }
            match run_cycle(&store, source, progress) {
                Ok(outcome) => report_delta(&outcome, progress),
                Err(e) => {
                    loge!("{}: cycle failed: {e}", source.prefix());
                    progress.log(&format!(
                        "{} cycle failed: {e} (will retry next interval)",
                        source.prefix()
                    ));
                }
            }
        }

        if params.once {
            return Ok(());
        }

        let mins = params.interval.as_secs() / 60;
        progress.update_status(&format!(
            "Sleeping now for {mins} minutes! Will check for new data afterwards..."
        ));
        if !sleep_until_stopped(params.interval, stop) {
            return Ok(());
        }
    }
}

/// Directory bootstrap belongs here, not in the store: `save` on a missing
/// directory is an error by contract.
fn bootstrap(params: &Params) -> Result<()> {
    ensure_directory(Path::new(LOGS_DIR))?;
    for source in Source::ALL {
        ensure_directory(&params.data_dir.join(source.dir_name()))?;
    }
    Ok(())
}

/// Sleep in short naps so an external stop request cuts the wait short.
/// Returns false when stopped.
fn sleep_until_stopped(total: Duration, stop: &AtomicBool) -> bool {
    let mut left = total;
    while !left.is_zero() {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let nap = left.min(Duration::from_millis(500));
        thread::sleep(nap);
        left -= nap;
    }
    !stop.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn sleep_honors_stop_flag_up_front() {
        let stop = AtomicBool::new(true);
        let begin = std::time::Instant::now();
        assert!(!sleep_until_stopped(Duration::from_secs(60), &stop));
        assert!(begin.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn sleep_runs_to_completion_without_stop() {
        let stop = AtomicBool::new(false);
        assert!(sleep_until_stopped(Duration::from_millis(20), &stop));
    }
}
