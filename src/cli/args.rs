//! Command-line argument definitions for sweep-catalog
//!
//! Each subcommand maps onto one library query so the data root can be
//! inspected without the web front end.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sweep catalog
///
/// Lists, pairs and normalizes temperature-sweep measurement files stored
/// under `<root>/<type>/<element>/`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sweep-catalog",
    version,
    about = "Index and normalize temperature-sweep measurement files",
    long_about = "Walks a data root laid out as <type>/<element>/<file>, pairs heating and \
                  cooling sweeps by the concentration in their filenames, and normalizes \
                  CSV/JSON files with inconsistent column names into temperature-sorted series."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data root directory
    ///
    /// Overrides the DATA_ROOT environment variable. Defaults to ./input
    #[arg(
        short = 'r',
        long = "root",
        value_name = "PATH",
        global = true,
        help = "Data root directory (overrides DATA_ROOT)"
    )]
    pub root: Option<PathBuf>,

    /// Output format for results
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List data types (top-level folders)
    Types,
    /// List elements recorded under a data type
    Elements {
        /// Data type folder name, e.g. resistance_temp
        data_type: String,
    },
    /// List data files of one type and element
    Files { data_type: String, element: String },
    /// Summarize heating/cooling experiments of one type and element
    Series { data_type: String, element: String },
    /// Load the heating and cooling curves of one experiment
    Chart {
        data_type: String,
        element: String,
        /// Experiment key parsed from the filenames, e.g. 0.5
        concentration: String,
    },
    /// Read and normalize a single data file
    Read {
        /// Path to a .csv or .json file
        file: PathBuf,
    },
    /// Search elements by case-insensitive substring (empty lists everything)
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Create the data root and the default type folders
    Init,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the logging level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
