// src/params.rs
use std::{path::PathBuf, time::Duration};

use crate::snapshot::Source;

pub const DEFAULT_DATA_DIR: &str = ".";
pub const LOGS_DIR: &str = "logs";
pub const DEFAULT_INTERVAL_MINS: u64 = 30;

#[derive(Clone)]
pub struct Params {
    pub data_dir: PathBuf,    // root holding jhu_data/ and cdc_data/
    pub interval: Duration,   // sleep between polling cycles
    pub once: bool,           // single pass, no loop
    pub sources: Vec<Source>, // which sources to poll this run
}

impl Params {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            interval: Duration::from_secs(DEFAULT_INTERVAL_MINS * 60),
            once: false,
            sources: Source::ALL.to_vec(),
        }
    }
}
