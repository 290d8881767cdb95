// src/snapshot.rs
//
// Canonical in-memory snapshot model. One record type per source, used
// identically for freshly fetched data and data reloaded from disk:
// encode/decode are a symmetric pair, so there is no provenance-dependent
// column offset to special-case anywhere.

use crate::compare::Rule;

/// Tracked upstream sources. The variant picks the snapshot layout, the
/// on-disk prefix/subdirectory, and the comparison rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Regional case/death/recovery counts (JHU sheet).
    Jhu,
    /// Test-outcome measure/count pairs (CDC page).
    Cdc,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Jhu, Source::Cdc];

    /// File-name prefix for stored snapshots.
    pub fn prefix(self) -> &'static str {
        match self {
            Source::Jhu => "jhu",
            Source::Cdc => "cdc",
        }
    }

    /// Subdirectory under the data root that owns this source's snapshots.
    pub fn dir_name(self) -> &'static str {
        match self {
            Source::Jhu => "jhu_data",
            Source::Cdc => "cdc_data",
        }
    }

    pub fn rule(self) -> Rule {
        match self {
            Source::Jhu => Rule::Regional,
            Source::Cdc => Rule::Measure,
        }
    }

    pub fn parse(token: &str) -> Option<Source> {
        match token.to_ascii_lowercase().as_str() {
            "jhu" => Some(Source::Jhu),
            "cdc" => Some(Source::Cdc),
            _ => None,
        }
    }
}

/// One regional row: canonical state name plus the core count triple.
/// Rate columns arrived in a later sheet revision and stay optional.
/// Sub-region rows simply repeat `state`; aggregation sums them.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionRecord {
    pub state: String,
    pub cases: u64,
    pub deaths: u64,
    pub recoveries: u64,
    pub test_rate: Option<f64>,
    pub hosp_rate: Option<f64>,
    pub incidence: Option<f64>,
    pub mort_rate: Option<f64>,
}

impl RegionRecord {
    /// Record with just the count triple, no rate columns.
    pub fn counts(state: impl Into<String>, cases: u64, deaths: u64, recoveries: u64) -> Self {
        Self {
            state: state.into(),
            cases,
            deaths,
            recoveries,
            test_rate: None,
            hosp_rate: None,
            incidence: None,
            mort_rate: None,
        }
    }
}

/// One measure row from the test-outcome table.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureRecord {
    pub measure: String,
    pub count: u64,
}

impl MeasureRecord {
    pub fn new(measure: impl Into<String>, count: u64) -> Self {
        Self { measure: measure.into(), count }
    }
}

/// One fetch cycle's normalized dataset for a source.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshot {
    Regional(Vec<RegionRecord>),
    Measures(Vec<MeasureRecord>),
}

const REGIONAL_HEADERS: [&str; 8] = [
    "state", "cases", "deaths", "recoveries",
    "test_rate", "hosp_rate", "incidence", "mort_rate",
];
const MEASURE_HEADERS: [&str; 2] = ["measure", "counts"];

impl Snapshot {
    pub fn empty(source: Source) -> Snapshot {
        match source {
            Source::Jhu => Snapshot::Regional(Vec::new()),
            Source::Cdc => Snapshot::Measures(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Snapshot::Regional(rows) => rows.len(),
            Snapshot::Measures(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn regional_rows(&self) -> &[RegionRecord] {
        match self {
            Snapshot::Regional(rows) => rows,
            Snapshot::Measures(_) => &[],
        }
    }

    pub fn measure_rows(&self) -> &[MeasureRecord] {
        match self {
            Snapshot::Measures(rows) => rows,
            Snapshot::Regional(_) => &[],
        }
    }

    pub fn headers(source: Source) -> Vec<String> {
        let names: &[&str] = match source {
            Source::Jhu => &REGIONAL_HEADERS,
            Source::Cdc => &MEASURE_HEADERS,
        };
        names.iter().map(|h| s!(*h)).collect()
    }

    /// Tabular form for persistence: (headers, rows). `decode` reverses this
    /// exactly.
    pub fn encode(&self) -> (Vec<String>, Vec<Vec<String>>) {
        match self {
            Snapshot::Regional(records) => {
                let rows = records
                    .iter()
                    .map(|r| {
                        vec![
                            r.state.clone(),
                            r.cases.to_string(),
                            r.deaths.to_string(),
                            r.recoveries.to_string(),
                            rate_cell(r.test_rate),
                            rate_cell(r.hosp_rate),
                            rate_cell(r.incidence),
                            rate_cell(r.mort_rate),
                        ]
                    })
                    .collect();
                (Self::headers(Source::Jhu), rows)
            }
            Snapshot::Measures(records) => {
                let rows = records
                    .iter()
                    .map(|r| vec![r.measure.clone(), r.count.to_string()])
                    .collect();
                (Self::headers(Source::Cdc), rows)
            }
        }
    }

    /// Rebuild a snapshot from parsed CSV rows. A leading header row is
    /// recognized by its first cell and skipped. Blank or missing numeric
    /// cells decode as zero (documented default); blank rate cells decode
    /// as absent.
    pub fn decode(source: Source, rows: Vec<Vec<String>>) -> Snapshot {
        let header_cell = match source {
            Source::Jhu => REGIONAL_HEADERS[0],
            Source::Cdc => MEASURE_HEADERS[0],
        };
        let body = rows
            .into_iter()
            .filter(|r| !r.is_empty() && !r[0].is_empty())
            .skip_while(|r| r[0].eq_ignore_ascii_case(header_cell));

        match source {
            Source::Jhu => Snapshot::Regional(
                body.map(|r| RegionRecord {
                    state: r[0].clone(),
                    cases: count_cell(r.get(1)),
                    deaths: count_cell(r.get(2)),
                    recoveries: count_cell(r.get(3)),
                    test_rate: rate_value(r.get(4)),
                    hosp_rate: rate_value(r.get(5)),
                    incidence: rate_value(r.get(6)),
                    mort_rate: rate_value(r.get(7)),
                })
                .collect(),
            ),
            Source::Cdc => Snapshot::Measures(
                body.map(|r| MeasureRecord {
                    measure: r[0].clone(),
                    count: count_cell(r.get(1)),
                })
                .collect(),
            ),
        }
    }
}

fn rate_cell(rate: Option<f64>) -> String {
    match rate {
        Some(v) => v.to_string(),
        None => s!(),
    }
}

fn count_cell(cell: Option<&String>) -> u64 {
    cell.map(|c| c.trim().parse().unwrap_or(0)).unwrap_or(0)
}

fn rate_value(cell: Option<&String>) -> Option<f64> {
    cell.and_then(|c| c.trim().parse().ok())
}
