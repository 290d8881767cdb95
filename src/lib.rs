// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod compare;
pub mod csv;
pub mod error;
pub mod file;
pub mod params;
pub mod regions;
pub mod runner;
pub mod scrape;
pub mod snapshot;
pub mod store;
