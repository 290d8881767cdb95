// src/scrape/jhu.rs
//
// Regional source: per-region case/death/recovery counts from the
// published JHU sheet, exported as CSV. Only US rows are kept; region
// cells read "City, ST" and the abbreviation is expanded to the canonical
// state name.

use crate::csv::parse_rows;
use crate::error::{Result, TrackerError};
use crate::regions;
use crate::scrape::net;
use crate::snapshot::{RegionRecord, Snapshot};

const HOST: &str = "docs.google.com";
const SHEET_PATH: &str =
    "/spreadsheets/d/1wQVypefm946ch4XDp37uZ-wartW4V7ILdg-qYiDXUHM/export?format=csv";

pub fn fetch() -> Result<Snapshot> {
    logf!("JHU: fetching sheet");
    let body = net::http_get(HOST, SHEET_PATH)?;
    let snap = parse_sheet(&body)?;
    logf!("JHU: downloaded {} region rows", snap.len());
    Ok(snap)
}

/// Sheet layout: region, country, last-update, cases, deaths, recoveries,
/// then optional rate columns in later revisions. The header row filters
/// itself out via the country column.
pub fn parse_sheet(text: &str) -> Result<Snapshot> {
    let mut records = Vec::new();

    for row in parse_rows(text, ',') {
        if row.len() < 4 || row[1].trim() != "US" {
            continue;
        }

        let region = row[0].trim();
        // The part after the comma is the state abbreviation; city-level
        // reporting was retired upstream, so the prefix is ignored.
        let abbr = region.rsplit(',').next().unwrap_or(region);
        let state = regions::expand_abbreviation(abbr)?;

        // Regions are only entered upstream once they have cases, so the
        // cases cell is always numeric. Deaths and recoveries are often
        // left blank for zero.
        let cases = row[3].trim().parse::<u64>().map_err(|_| {
            TrackerError::Malformed(format!("non-numeric cases cell for {region:?}"))
        })?;

        let mut rec = RegionRecord::counts(
            state,
            cases,
            blank_or_count(row.get(4)),
            blank_or_count(row.get(5)),
        );
        rec.test_rate = opt_rate(row.get(6));
        rec.hosp_rate = opt_rate(row.get(7));
        rec.incidence = opt_rate(row.get(8));
        rec.mort_rate = opt_rate(row.get(9));
        records.push(rec);
    }

    Ok(Snapshot::Regional(records))
}

fn blank_or_count(cell: Option<&String>) -> u64 {
    cell.map(|c| c.trim().parse().unwrap_or(0)).unwrap_or(0)
}

fn opt_rate(cell: Option<&String>) -> Option<f64> {
    cell.and_then(|c| c.trim().parse().ok())
}
