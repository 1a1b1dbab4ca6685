//! Request-shaped summaries built on the index, pairing and reader.
//!
//! These are the payloads a front end consumes: series previews per
//! experiment, chart curves for one experiment, and a sorted dopant search
//! listing. A file that cannot be read never fails the whole report; its
//! entry carries the error text instead.

use crate::catalog::search_elements;
use crate::constants::chart;
use crate::models::{CycleRole, DataFile, ExperimentGroup, TimePoint};
use crate::pairing::group_pairs;
use crate::reader::read_data_file;
use crate::schema::SchemaCandidates;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Overview of one experiment group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub concentration: String,
    pub heating_file: Option<String>,
    pub cooling_file: Option<String>,
    pub has_both: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One plotted sweep, or the reason it could not be loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub label: String,
    #[serde(rename = "type")]
    pub role: CycleRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<TimePoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Heating/cooling curves of a single experiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub concentration: String,
    pub element: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub data_type: String,
    pub file_count: usize,
}

/// Search hit: an element and the data types it has files for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    pub element: String,
    pub types: Vec<TypeCount>,
}

/// Summarize every experiment of one (type, element), ordered by concentration
pub fn series_overview(
    root: &Path,
    data_type: &str,
    element: &str,
    candidates: &SchemaCandidates,
) -> Vec<SeriesSummary> {
    group_pairs(root, data_type, element)
        .into_iter()
        .map(|(concentration, group)| summarize_group(concentration, &group, candidates))
        .collect()
}

fn summarize_group(
    concentration: String,
    group: &ExperimentGroup,
    candidates: &SchemaCandidates,
) -> SeriesSummary {
    let mut summary = SeriesSummary {
        concentration,
        heating_file: group.heating.as_ref().map(|f| f.name.clone()),
        cooling_file: group.cooling.as_ref().map(|f| f.name.clone()),
        has_both: group.has_both(),
        y_label: None,
        sample_points: None,
        error: None,
    };

    if let Some(file) = group.preview_file() {
        match read_data_file(file, candidates) {
            Ok(series) => {
                summary.sample_points = Some(series.len());
                summary.y_label = Some(series.value_label);
            }
            Err(e) => {
                warn!("Preview of {} failed: {}", file.path.display(), e);
                summary.error = Some(e.to_string());
            }
        }
    }

    summary
}

/// Axis label shown for a data type
pub fn y_label_for(data_type: &str) -> &'static str {
    if data_type.contains("resistance") {
        chart::RESISTANCE_LABEL
    } else {
        chart::TRANSMITTANCE_LABEL
    }
}

/// Load the heating and cooling curves of one experiment.
///
/// Returns `None` when no files map to `concentration`.
pub fn chart_data(
    root: &Path,
    data_type: &str,
    element: &str,
    concentration: &str,
    candidates: &SchemaCandidates,
) -> Option<ChartData> {
    let pairs = group_pairs(root, data_type, element);
    let group = pairs.get(concentration)?;

    let curves = [CycleRole::Heating, CycleRole::Cooling]
        .into_iter()
        .filter_map(|role| group.get(role).map(|file| load_curve(role, file, candidates)))
        .collect();

    Some(ChartData {
        concentration: concentration.to_string(),
        element: element.to_string(),
        data_type: data_type.to_string(),
        y_label: y_label_for(data_type).to_string(),
        curves,
    })
}

fn load_curve(role: CycleRole, file: &DataFile, candidates: &SchemaCandidates) -> Curve {
    let color = match role {
        CycleRole::Heating => Some(chart::HEATING_COLOR),
        CycleRole::Cooling => Some(chart::COOLING_COLOR),
        CycleRole::Unknown => None,
    };

    match read_data_file(file, candidates) {
        Ok(series) => Curve {
            label: role.label().to_string(),
            role,
            color: color.map(str::to_string),
            data: Some(series.points),
            error: None,
        },
        Err(e) => {
            warn!(
                "Loading {} curve from {} failed: {}",
                role,
                file.path.display(),
                e
            );
            Curve {
                label: role.label().to_string(),
                role,
                color: None,
                data: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Search elements and flatten the hits into a sorted listing.
///
/// Elements and their types are ordered case-insensitively.
pub fn search_summary(root: &Path, query: &str) -> Vec<ElementSummary> {
    let mut results: Vec<ElementSummary> = search_elements(root, query)
        .into_iter()
        .map(|(element, typed)| {
            let mut types: Vec<TypeCount> = typed
                .into_iter()
                .map(|(data_type, files)| TypeCount {
                    data_type,
                    file_count: files.len(),
                })
                .collect();
            types.sort_by(|a, b| presentation_order(&a.data_type, &b.data_type));
            ElementSummary { element, types }
        })
        .collect();

    results.sort_by(|a, b| presentation_order(&a.element, &b.element));
    results
}

/// Case-insensitive ordering, ties broken by the exact spelling
fn presentation_order(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn create_test_root(temp_dir: &TempDir) -> std::path::PathBuf {
        let root = temp_dir.path().to_path_buf();
        write(&root, "resistance_temp/B/b_0.5_heating.csv", "T,R\n320,2\n300,4\n");
        write(&root, "resistance_temp/B/b_0.5_cooling.csv", "T,R\n300,5\n");
        write(&root, "resistance_temp/B/b_1.0_cooling.json", "{\"rows\": []}");
        write(&root, "resistance_temp/B/b_2.0.csv", "T,R\n1,1\n");
        write(&root, "transmittance_temp/cr/cr_1.2.json", "[{\"T\": 1, \"value\": 2}]");
        write(&root, "transmittance_temp/B/b_0.5_heating.csv", "T,value\n1,2\n");
        write(&root, "Resistance_extra/Cr/cr_3_heating.csv", "T,R\n1,2\n");
        root
    }

    #[test]
    fn test_series_overview() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let overview =
            series_overview(&root, "resistance_temp", "B", &SchemaCandidates::default());
        let keys: Vec<&str> = overview.iter().map(|s| s.concentration.as_str()).collect();
        assert_eq!(keys, vec!["0.5", "1.0", "2.0"]);

        let pair = &overview[0];
        assert!(pair.has_both);
        assert_eq!(pair.heating_file.as_deref(), Some("b_0.5_heating.csv"));
        assert_eq!(pair.y_label.as_deref(), Some("R"));
        assert_eq!(pair.sample_points, Some(2));
        assert!(pair.error.is_none());
    }

    #[test]
    fn test_series_overview_reports_bad_file_inline() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let overview =
            series_overview(&root, "resistance_temp", "B", &SchemaCandidates::default());

        let broken = &overview[1];
        assert_eq!(broken.cooling_file.as_deref(), Some("b_1.0_cooling.json"));
        assert!(broken.y_label.is_none());
        assert!(broken.error.as_deref().unwrap().contains("b_1.0_cooling.json"));

        // Unknown-only group has no preview at all
        let unknown = &overview[2];
        assert!(unknown.heating_file.is_none() && unknown.cooling_file.is_none());
        assert!(unknown.y_label.is_none() && unknown.error.is_none());
    }

    #[test]
    fn test_chart_data() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let chart = chart_data(&root, "resistance_temp", "B", "0.5", &SchemaCandidates::default())
            .unwrap();

        assert_eq!(chart.y_label, "Resistance");
        assert_eq!(chart.curves.len(), 2);
        assert_eq!(chart.curves[0].role, CycleRole::Heating);
        assert_eq!(chart.curves[0].color.as_deref(), Some(chart::HEATING_COLOR));
        assert_eq!(
            chart.curves[0].data.as_deref(),
            Some(&[TimePoint::new(300.0, 4.0), TimePoint::new(320.0, 2.0)][..])
        );
        assert_eq!(chart.curves[1].label, "Cooling");
    }

    #[test]
    fn test_chart_data_missing_concentration() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        assert!(
            chart_data(&root, "resistance_temp", "B", "9.9", &SchemaCandidates::default())
                .is_none()
        );
    }

    #[test]
    fn test_chart_data_curve_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let chart = chart_data(&root, "resistance_temp", "B", "1.0", &SchemaCandidates::default())
            .unwrap();
        assert_eq!(chart.curves.len(), 1);
        assert!(chart.curves[0].data.is_none());
        assert!(chart.curves[0].error.is_some());
    }

    #[test]
    fn test_chart_data_skips_unknown_role() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let chart = chart_data(&root, "transmittance_temp", "cr", "1.2", &SchemaCandidates::default())
            .unwrap();
        assert_eq!(chart.y_label, "Transmittance");
        assert!(chart.curves.is_empty());
    }

    #[test]
    fn test_y_label_for() {
        assert_eq!(y_label_for("resistance_temp"), "Resistance");
        assert_eq!(y_label_for("transmittance_temp"), "Transmittance");
        assert_eq!(y_label_for("Resistance_extra"), "Transmittance");
    }

    #[test]
    fn test_search_summary_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let summary = search_summary(&root, "");
        let elements: Vec<&str> = summary.iter().map(|s| s.element.as_str()).collect();
        assert_eq!(elements, vec!["B", "Cr", "cr"]);

        let b_types: Vec<(&str, usize)> = summary[0]
            .types
            .iter()
            .map(|t| (t.data_type.as_str(), t.file_count))
            .collect();
        assert_eq!(b_types, vec![("resistance_temp", 4), ("transmittance_temp", 1)]);
    }

    #[test]
    fn test_search_summary_filters() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let summary = search_summary(&root, "CR");
        assert_eq!(summary.len(), 2);
        assert!(summary.iter().all(|s| s.element.eq_ignore_ascii_case("cr")));
    }

    #[test]
    fn test_chart_data_serializes_like_api_payload() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_test_root(&temp_dir);

        let chart = chart_data(&root, "resistance_temp", "B", "0.5", &SchemaCandidates::default())
            .unwrap();
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["type"], "resistance_temp");
        assert_eq!(json["curves"][0]["type"], "heating");
        assert_eq!(json["curves"][0]["data"][0]["temperature"], 300.0);
        assert!(json["curves"][0].get("error").is_none());
    }
}
