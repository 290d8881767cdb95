// src/regions.rs
//
// Canonical region identifiers. Upstream rows carry two-letter state
// abbreviations; everything downstream (aggregation, deltas, stored
// snapshots) uses the full state name as the correlation key.

use crate::error::{Result, TrackerError};

const STATES: [(&str, &str); 50] = [
    ("AL", "Alabama"), ("AK", "Alaska"), ("AZ", "Arizona"), ("AR", "Arkansas"),
    ("CA", "California"), ("CO", "Colorado"), ("CT", "Connecticut"),
    ("DE", "Delaware"), ("FL", "Florida"), ("GA", "Georgia"), ("HI", "Hawaii"),
    ("ID", "Idaho"), ("IL", "Illinois"), ("IN", "Indiana"), ("IA", "Iowa"),
    ("KS", "Kansas"), ("KY", "Kentucky"), ("LA", "Louisiana"), ("ME", "Maine"),
    ("MD", "Maryland"), ("MA", "Massachusetts"), ("MI", "Michigan"),
    ("MN", "Minnesota"), ("MS", "Mississippi"), ("MO", "Missouri"),
    ("MT", "Montana"), ("NE", "Nebraska"), ("NV", "Nevada"),
    ("NH", "New Hampshire"), ("NJ", "New Jersey"), ("NM", "New Mexico"),
    ("NY", "New York"), ("NC", "North Carolina"), ("ND", "North Dakota"),
    ("OH", "Ohio"), ("OK", "Oklahoma"), ("OR", "Oregon"),
    ("PA", "Pennsylvania"), ("RI", "Rhode Island"), ("SC", "South Carolina"),
    ("SD", "South Dakota"), ("TN", "Tennessee"), ("TX", "Texas"),
    ("UT", "Utah"), ("VT", "Vermont"), ("VA", "Virginia"),
    ("WA", "Washington"), ("WV", "West Virginia"), ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Map a two-letter abbreviation to the canonical state name.
/// Whitespace-tolerant and case-insensitive. Unknown abbreviations are a
/// hard error: silently dropping a region would corrupt every comparison
/// downstream.
pub fn expand_abbreviation(abbr: &str) -> Result<&'static str> {
    let key: String = abbr.chars().filter(|c| !c.is_whitespace()).collect();
    STATES
        .iter()
        .find(|(a, _)| a.eq_ignore_ascii_case(&key))
        .map(|&(_, name)| name)
        .ok_or_else(|| TrackerError::UnknownRegion { name: s!(abbr) })
}
