// src/compare.rs
//
// Snapshot novelty detection. Pure functions of (recent, previous): no
// state, no I/O. The rule variant is picked by the source; both variants
// answer the same question — "is this fetch materially new data?"
//
// Regional comparison is keyed by canonical region identifier, with
// duplicate sub-region rows merged by summation first. Positional row
// pairing would misattribute deltas the moment upstream resorts its rows.

use std::collections::BTreeMap;

use crate::snapshot::{RegionRecord, Snapshot};

/// Comparison strategy, one per source layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Region-keyed comparison of case/death/recovery aggregates.
    Regional,
    /// Pairwise comparison of measure/count rows.
    Measure,
}

/// Case/death/recovery triple summed per region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub cases: u64,
    pub deaths: u64,
    pub recoveries: u64,
}

/// Per-region aggregates, keyed by canonical region name. BTreeMap keeps
/// iteration (and therefore delta output) deterministic.
pub type Totals = BTreeMap<String, Tally>;

/// Sum the count triple across all rows sharing a region identifier.
pub fn region_totals(records: &[RegionRecord]) -> Totals {
    let mut totals = Totals::new();
    for rec in records {
        let t = totals.entry(rec.state.clone()).or_default();
        t.cases += rec.cases;
        t.deaths += rec.deaths;
        t.recoveries += rec.recoveries;
    }
    totals
}

/// Which regions moved, by metric. Regions are listed when a count strictly
/// increased, or when the region is newly present with a positive count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    pub cases: Vec<String>,
    pub deaths: Vec<String>,
    pub recoveries: Vec<String>,
}

impl Delta {
    pub fn between(new: &Totals, old: &Totals) -> Delta {
        let mut delta = Delta::default();
        for (region, t) in new {
            let prev = old.get(region).copied().unwrap_or_default();
            let known = old.contains_key(region);

            if rose(t.cases, prev.cases, known) { delta.cases.push(region.clone()); }
            if rose(t.deaths, prev.deaths, known) { delta.deaths.push(region.clone()); }
            if rose(t.recoveries, prev.recoveries, known) { delta.recoveries.push(region.clone()); }
        }
        delta
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() && self.deaths.is_empty() && self.recoveries.is_empty()
    }
}

fn rose(new: u64, old: u64, known: bool) -> bool {
    if known { new > old } else { new > 0 }
}

/// Comparator output: the novelty verdict, plus the structured delta where
/// the rule produces one (regional only).
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub is_new: bool,
    pub delta: Option<Delta>,
}

impl Rule {
    /// Decide whether `recent` is materially new relative to `previous`.
    /// An empty `previous` (nothing stored yet) is unconditionally new.
    pub fn is_new(&self, recent: &Snapshot, previous: &Snapshot) -> Verdict {
        match self {
            Rule::Regional => {
                let new_totals = region_totals(recent.regional_rows());
                let old_totals = region_totals(previous.regional_rows());
                let delta = Delta::between(&new_totals, &old_totals);
                // Maps differ iff the region key set changed or some
                // region's triple changed.
                let is_new = previous.is_empty() || new_totals != old_totals;
                Verdict { is_new, delta: Some(delta) }
            }
            Rule::Measure => {
                if previous.is_empty() {
                    return Verdict { is_new: true, delta: None };
                }
                // Zip over the overlapping prefix. A record-count mismatch
                // alone is not novelty: the measure set is assumed stable.
                let changed = recent
                    .measure_rows()
                    .iter()
                    .zip(previous.measure_rows())
                    .any(|(a, b)| a.measure != b.measure || a.count != b.count);
                Verdict { is_new: changed, delta: None }
            }
        }
    }
}
