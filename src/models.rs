//! Core data structures for sweep indexing.
//!
//! Every type here is a transient, read-only view derived from the
//! filesystem on each query. Nothing is cached between calls.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// A recognized measurement file under `<root>/<type>/<element>/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DataFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File name including extension
    pub name: String,
    /// File name without its extension
    pub stem: String,
}

impl DataFile {
    /// Build a data file view from a path. Returns `None` for paths without
    /// a file name (e.g. `..`).
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_string_lossy().into_owned();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());

        Some(Self { path, name, stem })
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path)
    }
}

pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// One normalized sample of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub temperature: f64,
    pub value: f64,
}

impl TimePoint {
    pub fn new(temperature: f64, value: f64) -> Self {
        Self { temperature, value }
    }
}

/// Temperature-sorted sweep with the name of its measured quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Source column/field name of the measured quantity
    pub value_label: String,
    pub points: Vec<TimePoint>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Direction of a thermal sweep, inferred from the filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleRole {
    Heating,
    Cooling,
    Unknown,
}

impl CycleRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleRole::Heating => "heating",
            CycleRole::Cooling => "cooling",
            CycleRole::Unknown => "unknown",
        }
    }

    /// Capitalized form used for chart legends
    pub fn label(&self) -> &'static str {
        match self {
            CycleRole::Heating => "Heating",
            CycleRole::Cooling => "Cooling",
            CycleRole::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CycleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files sharing one experiment key, at most one per cycle role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperimentGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<DataFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling: Option<DataFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<DataFile>,
}

impl ExperimentGroup {
    pub fn get(&self, role: CycleRole) -> Option<&DataFile> {
        match role {
            CycleRole::Heating => self.heating.as_ref(),
            CycleRole::Cooling => self.cooling.as_ref(),
            CycleRole::Unknown => self.unknown.as_ref(),
        }
    }

    /// Store `file` under `role`, returning whatever occupied the slot
    pub fn insert(&mut self, role: CycleRole, file: DataFile) -> Option<DataFile> {
        let slot = match role {
            CycleRole::Heating => &mut self.heating,
            CycleRole::Cooling => &mut self.cooling,
            CycleRole::Unknown => &mut self.unknown,
        };
        slot.replace(file)
    }

    pub fn has_both(&self) -> bool {
        self.heating.is_some() && self.cooling.is_some()
    }

    /// Number of populated role slots (0-3)
    pub fn populated(&self) -> usize {
        [&self.heating, &self.cooling, &self.unknown]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// File used to label the group: heating if present, otherwise cooling
    pub fn preview_file(&self) -> Option<&DataFile> {
        self.heating.as_ref().or(self.cooling.as_ref())
    }
}

/// Experiment groups of one (type, element) keyed by concentration
pub type PairingMap = BTreeMap<String, ExperimentGroup>;

/// element -> type -> files. Unordered; sort at presentation time.
pub type Catalog = HashMap<String, HashMap<String, Vec<DataFile>>>;
