//! Element-centric catalog of the data root
//!
//! Inverts the on-disk `type/element` layout into `element -> type -> files`
//! so callers can ask which measurements exist for a given dopant.

use crate::index::{list_elements, list_files, list_types};
use crate::models::Catalog;
use std::path::Path;
use tracing::debug;

/// Build the element -> type -> files mapping for the whole root.
///
/// (type, element) folders without data files contribute nothing.
pub fn build_catalog(root: &Path) -> Catalog {
    let mut catalog = Catalog::new();

    for data_type in list_types(root) {
        for element in list_elements(root, &data_type) {
            let files = list_files(root, &data_type, &element);
            if files.is_empty() {
                continue;
            }

            catalog
                .entry(element)
                .or_default()
                .entry(data_type.clone())
                .or_default()
                .extend(files);
        }
    }

    debug!(
        "Catalog of {} has {} elements",
        root.display(),
        catalog.len()
    );
    catalog
}

/// Elements whose name contains `query` (case-insensitive, trimmed).
///
/// A blank query returns the full catalog.
pub fn search_elements(root: &Path, query: &str) -> Catalog {
    let query = query.trim();
    let full = build_catalog(root);
    if query.is_empty() {
        return full;
    }

    let needle = query.to_lowercase();
    full.into_iter()
        .filter(|(element, _)| element.to_lowercase().contains(&needle))
        .collect()
}
