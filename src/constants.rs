//! Application constants for sweep indexing
//!
//! Column-name guesses, filename conventions, and defaults used throughout
//! the crate.

// =============================================================================
// Schema Detection
// =============================================================================

/// Temperature column names, highest priority first
pub const TEMPERATURE_KEYS: &[&str] = &["temperature", "temp", "T", "Temp", "Temperature"];

/// Measured-quantity column names, highest priority first
pub const VALUE_KEYS: &[&str] = &[
    "value",
    "resistance",
    "transmittance",
    "R",
    "rho",
    "Transmittance",
    "Value",
];

/// Label reported for a CSV file that has a header but no data rows
pub const DEFAULT_VALUE_LABEL: &str = "value";

/// Wrapper field holding the record sequence in object-shaped JSON files
pub const JSON_DATA_FIELD: &str = "data";

// =============================================================================
// File and Directory Conventions
// =============================================================================

/// Extension of delimited-text measurement files (compared case-insensitively)
pub const CSV_EXTENSION: &str = "csv";

/// Extension of structured-text measurement files (compared case-insensitively)
pub const JSON_EXTENSION: &str = "json";

/// Stem marker for a heating sweep
pub const HEATING_MARKER: &str = "_heating";

/// Stem marker for a cooling sweep
pub const COOLING_MARKER: &str = "_cooling";

/// Separator between the element prefix and the experiment key in a stem
pub const KEY_SEPARATOR: char = '_';

/// Type folders created by `init`
pub const DEFAULT_DATA_TYPES: &[&str] = &["resistance_temp", "transmittance_temp"];

/// Data root used when neither the environment nor the CLI provides one
pub const DEFAULT_DATA_ROOT: &str = "input";

/// Environment variable overriding the data root
pub const DATA_ROOT_ENV: &str = "DATA_ROOT";

// =============================================================================
// Chart Presentation
// =============================================================================

pub mod chart {
    /// Curve color for heating sweeps (red)
    pub const HEATING_COLOR: &str = "#ef4444";

    /// Curve color for cooling sweeps (blue)
    pub const COOLING_COLOR: &str = "#3b82f6";

    /// Axis label for types whose name contains "resistance"
    pub const RESISTANCE_LABEL: &str = "Resistance";

    /// Axis label for every other type
    pub const TRANSMITTANCE_LABEL: &str = "Transmittance";
}
