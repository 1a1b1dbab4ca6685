//! Error handling for sweep indexing and file normalization.
//!
//! Directory queries never fail: missing folders simply produce empty
//! results. Errors only arise when a single measurement file cannot be
//! turned into a [`TimeSeries`](crate::models::TimeSeries), and they always
//! name the file so callers can report them per item.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which half of the (temperature, value) pair a lookup was resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Temperature,
    Value,
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRole::Temperature => write!(f, "temperature"),
            FieldRole::Value => write!(f, "value"),
        }
    }
}

/// Failure of the schema resolver on one record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("no {role} field matches any of {candidates:?}")]
    NoMatchingField {
        role: FieldRole,
        candidates: Vec<String>,
    },
}

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", file_label(.path))]
    SchemaResolution {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("{}: {reason}", file_label(.path))]
    FileFormat { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SweepError {
    /// Create a file format error for the given file
    pub fn file_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a resolver failure with the file it occurred in
    pub fn schema_resolution(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        Self::SchemaResolution {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for failures scoped to a single data file
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            SweepError::SchemaResolution { .. } | SweepError::FileFormat { .. }
        )
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub type Result<T> = std::result::Result<T, SweepError>;
