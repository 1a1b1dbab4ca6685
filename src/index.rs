//! Directory index over a sweep data root
//!
//! Measurement data follows a fixed two-level layout:
//! ```text
//! root/
//!   resistance_temp/        <- data type
//!     B/                    <- element
//!       b_0.5_heating.csv
//!       b_0.5_cooling.csv
//!     Cr/
//!       cr_1.2.json
//!   transmittance_temp/
//!     ...
//! ```
//! Only the immediate children at each level are inspected; anything nested
//! below an element folder is invisible. Missing folders yield empty lists.
//! Listing order follows the filesystem and is not guaranteed.

use crate::constants::{CSV_EXTENSION, JSON_EXTENSION};
use crate::models::{DataFile, extension_of};
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Data type names: immediate subdirectories of `root`
pub fn list_types(root: &Path) -> Vec<String> {
    subdirectory_names(root)
}

/// Element names: immediate subdirectories of `root/data_type`
pub fn list_elements(root: &Path, data_type: &str) -> Vec<String> {
    subdirectory_names(&root.join(data_type))
}

/// Recognized data files directly under `root/data_type/element`
pub fn list_files(root: &Path, data_type: &str, element: &str) -> Vec<DataFile> {
    let dir = root.join(data_type).join(element);

    let files: Vec<DataFile> = immediate_entries(&dir)
        .filter(|entry| entry.file_type().is_file() && is_data_file(entry.path()))
        .filter_map(|entry| DataFile::from_path(entry.into_path()))
        .collect();

    debug!("Found {} data files in {}", files.len(), dir.display());
    files
}

/// Check if a path has one of the recognized data extensions
pub fn is_data_file(path: &Path) -> bool {
    matches!(
        extension_of(path).as_deref(),
        Some(CSV_EXTENSION) | Some(JSON_EXTENSION)
    )
}

fn subdirectory_names(dir: &Path) -> Vec<String> {
    immediate_entries(dir)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

/// Immediate children of `dir`, following symlinks. Empty if `dir` is absent.
fn immediate_entries(dir: &Path) -> Box<dyn Iterator<Item = DirEntry>> {
    if !dir.is_dir() {
        debug!("Directory not found, treating as empty: {}", dir.display());
        return Box::new(std::iter::empty());
    }

    Box::new(
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            }),
    )
}
