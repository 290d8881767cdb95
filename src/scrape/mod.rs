// src/scrape/mod.rs
//
// Fetch adapters. Thin collaborators around the core: each produces one
// normalized Snapshot per cycle. Parsing is pure (and tested); transport
// lives in net.rs.

pub mod cdc;
pub mod html;
pub mod jhu;
pub mod net;

use crate::error::Result;
use crate::snapshot::{Snapshot, Source};

/// Fetch one fresh snapshot for `source`.
pub fn fetch(source: Source) -> Result<Snapshot> {
    match source {
        Source::Jhu => jhu::fetch(),
        Source::Cdc => cdc::fetch(),
    }
}
