// src/scrape/cdc.rs
//
// Alternate source: test-outcome measure/count pairs scraped from the
// first table on the CDC cases page.

use crate::error::{Result, TrackerError};
use crate::scrape::{html, net};
use crate::snapshot::{MeasureRecord, Snapshot};

const HOST: &str = "www.cdc.gov";
const PAGE_PATH: &str = "/coronavirus/2019-ncov/cases-in-us.html";

pub fn fetch() -> Result<Snapshot> {
    logf!("CDC: fetching cases page");
    let body = net::http_get(HOST, PAGE_PATH)?;
    let snap = parse_page(&body)?;
    logf!("CDC: downloaded {} measures", snap.len());
    Ok(snap)
}

/// Each table row is `<th>measure</th><td>count</td>`. The aggregate
/// `Total` row is dropped; a blank or missing count cell reads as zero.
pub fn parse_page(doc: &str) -> Result<Snapshot> {
    let table = html::first_table(doc)
        .ok_or_else(|| TrackerError::Malformed(s!("no table in cases page")))?;

    let mut records = Vec::new();
    for row in html::table_rows(table) {
        let Some(raw) = html::cell_text(row, "th") else { continue };
        let measure = html::normalize_ws(&raw.replace('§', "").replace(':', ""));
        if measure.is_empty() || measure == "Total" {
            continue;
        }

        let count = html::cell_text(row, "td")
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0);
        records.push(MeasureRecord::new(measure, count));
    }

    Ok(Snapshot::Measures(records))
}
