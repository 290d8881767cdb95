// src/error.rs
use std::io;

use thiserror::Error;

/// Error type for store, comparator, and fetch failures.
///
/// Two documented lenient paths exist and are NOT errors: an empty store
/// reads back as an empty snapshot (always novel), and blank numeric cells
/// decode as zero. Everything else propagates.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A stored file name does not carry a readable `MM_DD_HH_MM_SS` stamp.
    /// `most_recent` downgrades this to a skip; callers parsing a single
    /// name see it as a hard error.
    #[error("snapshot name {name:?} does not carry a readable timestamp")]
    MalformedTimestamp { name: String },

    /// A region abbreviation could not be mapped to its canonical name.
    /// Aborts the current fetch cycle; downstream aggregation needs every
    /// identifier resolved.
    #[error("unknown region identifier {name:?}")]
    UnknownRegion { name: String },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("malformed upstream payload: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
