//! Sweep Catalog Library
//!
//! Indexes a directory tree of temperature-sweep measurement files
//! (resistance, transmittance, ...) and normalizes them for charting.
//!
//! This library provides tools for:
//! - Listing data types, elements and data files under a two-level data root
//! - Resolving temperature/value columns across inconsistent CSV and JSON schemas
//! - Reading files into temperature-sorted time series
//! - Pairing heating and cooling sweeps by the concentration in their filenames
//! - Building and searching an element -> type -> files catalog
//!
//! Every query re-reads the filesystem; nothing is cached between calls.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod index;
pub mod models;
pub mod pairing;
pub mod reader;
pub mod report;
pub mod schema;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use catalog::{build_catalog, search_elements};
pub use config::Config;
pub use error::{Result, SchemaError, SweepError};
pub use index::{list_elements, list_files, list_types};
pub use models::{
    Catalog, CycleRole, DataFile, ExperimentGroup, PairingMap, TimePoint, TimeSeries,
};
pub use pairing::{group_files, group_pairs, parse_stem};
pub use reader::{read_data_file, read_timeseries};
pub use schema::{FieldNames, ResolvedSchema, SchemaCandidates, resolve};
