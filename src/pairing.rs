//! Heating/cooling pairing of sweep files by experiment key
//!
//! Filenames carry the experiment metadata:
//! ```text
//! b_0.5_heating.csv  ->  role Heating, concentration "0.5"
//! b_0.5_cooling.csv  ->  role Cooling, concentration "0.5"
//! cr_1.2.json        ->  role Unknown, concentration "1.2"
//! ```
//! The role marker is removed from the stem, then everything after the first
//! underscore is the concentration (the leading token is the element prefix).
//! A stem without underscores is used verbatim. Concentrations stay strings,
//! so `0.5` and `0.50` are different experiments.

use crate::constants::{COOLING_MARKER, HEATING_MARKER, KEY_SEPARATOR};
use crate::index::list_files;
use crate::models::{CycleRole, DataFile, PairingMap};
use std::path::Path;
use tracing::debug;

/// Experiment key and cycle role recovered from one filename stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemInfo {
    pub concentration: String,
    pub role: CycleRole,
}

/// Parse a filename stem into its concentration and cycle role
pub fn parse_stem(stem: &str) -> StemInfo {
    let (role, base) = if stem.contains(HEATING_MARKER) {
        (CycleRole::Heating, stem.replace(HEATING_MARKER, ""))
    } else if stem.contains(COOLING_MARKER) {
        (CycleRole::Cooling, stem.replace(COOLING_MARKER, ""))
    } else {
        (CycleRole::Unknown, stem.to_string())
    };

    let concentration = match base.split_once(KEY_SEPARATOR) {
        Some((_prefix, rest)) => rest.to_string(),
        None => base,
    };

    StemInfo {
        concentration,
        role,
    }
}

/// Group already-listed files by concentration and role.
///
/// A later file with the same (concentration, role) replaces the earlier one.
pub fn group_files<'a, I>(files: I) -> PairingMap
where
    I: IntoIterator<Item = &'a DataFile>,
{
    let mut pairs = PairingMap::new();

    for file in files {
        let StemInfo {
            concentration,
            role,
        } = parse_stem(&file.stem);

        let group = pairs.entry(concentration).or_default();
        if let Some(replaced) = group.insert(role, file.clone()) {
            debug!(
                "'{}' replaces '{}' as the {} file",
                file.name, replaced.name, role
            );
        }
    }

    pairs
}

/// Group the files of one (type, element) into experiment pairs
pub fn group_pairs(root: &Path, data_type: &str, element: &str) -> PairingMap {
    let files = list_files(root, data_type, element);
    let pairs = group_files(&files);

    debug!(
        "Grouped {} files of {}/{} into {} experiments",
        files.len(),
        data_type,
        element,
        pairs.len()
    );

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> DataFile {
        DataFile::from_path(format!("/data/resistance_temp/B/{name}")).unwrap()
    }

    #[test]
    fn test_parse_heating_stem() {
        let info = parse_stem("b_0.5_heating");
        assert_eq!(info.concentration, "0.5");
        assert_eq!(info.role, CycleRole::Heating);
    }

    #[test]
    fn test_parse_cooling_stem() {
        let info = parse_stem("b_0.5_cooling");
        assert_eq!(info.concentration, "0.5");
        assert_eq!(info.role, CycleRole::Cooling);
    }

    #[test]
    fn test_parse_unknown_stem() {
        let info = parse_stem("cr_1.2");
        assert_eq!(info.concentration, "1.2");
        assert_eq!(info.role, CycleRole::Unknown);
    }

    #[test]
    fn test_parse_stem_without_underscore() {
        assert_eq!(parse_stem("sample").concentration, "sample");
        assert_eq!(parse_stem("sample_heating").concentration, "sample");
    }

    #[test]
    fn test_parse_stem_keeps_everything_after_first_underscore() {
        let info = parse_stem("fe_2.0_run3_cooling");
        assert_eq!(info.concentration, "2.0_run3");
        assert_eq!(info.role, CycleRole::Cooling);
    }

    #[test]
    fn test_marker_anywhere_in_stem() {
        let info = parse_stem("2024-01-01__w_heating_1.5");
        assert_eq!(info.role, CycleRole::Heating);
        assert_eq!(info.concentration, "_w_1.5");
    }

    #[test]
    fn test_heating_marker_takes_precedence() {
        let info = parse_stem("b_heating_cooling");
        assert_eq!(info.role, CycleRole::Heating);
        assert_eq!(info.concentration, "cooling");
    }

    #[test]
    fn test_every_marker_occurrence_is_removed() {
        let info = parse_stem("b_0.5_heating_heating");
        assert_eq!(info.concentration, "0.5");
    }

    #[test]
    fn test_group_heating_and_cooling_pair() {
        let files = vec![file("b_0.5_heating.csv"), file("b_0.5_cooling.csv")];
        let pairs = group_files(&files);

        assert_eq!(pairs.len(), 1);
        let group = &pairs["0.5"];
        assert_eq!(group.heating.as_ref().unwrap().name, "b_0.5_heating.csv");
        assert_eq!(group.cooling.as_ref().unwrap().name, "b_0.5_cooling.csv");
        assert!(group.unknown.is_none());
        assert!(group.has_both());
    }

    #[test]
    fn test_group_unknown_role() {
        let files = vec![file("cr_1.2.json")];
        let pairs = group_files(&files);

        let group = &pairs["1.2"];
        assert_eq!(group.populated(), 1);
        assert_eq!(group.unknown.as_ref().unwrap().name, "cr_1.2.json");
        assert!(group.preview_file().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let files = vec![
            file("b_0.5_heating.csv"),
            file("B_0.5_heating.json"),
            file("b_0.5_cooling.csv"),
        ];
        let pairs = group_files(&files);

        assert_eq!(pairs.len(), 1);
        let group = &pairs["0.5"];
        assert_eq!(group.heating.as_ref().unwrap().name, "B_0.5_heating.json");
        assert_eq!(group.populated(), 2);
    }

    #[test]
    fn test_concentrations_are_not_normalized() {
        let files = vec![file("b_0.5_heating.csv"), file("b_0.50_cooling.csv")];
        let pairs = group_files(&files);

        assert_eq!(pairs.len(), 2);
        assert!(!pairs["0.5"].has_both());
        assert!(!pairs["0.50"].has_both());
    }

    #[test]
    fn test_group_empty_input() {
        let files: Vec<DataFile> = Vec::new();
        assert!(group_files(&files).is_empty());
    }
}
