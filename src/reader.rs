//! Record reader for sweep measurement files
//!
//! Turns one `.csv` or `.json` file into a [`TimeSeries`]: the temperature
//! and value fields are resolved once from the first record, every record is
//! parsed with those same keys, and the points are stable-sorted by
//! temperature before returning.
//!
//! Accepted layouts:
//! * `.csv`  – header row, then one record per line
//! * `.json` – `[{...}, ...]` or `{"data": [{...}, ...], ...}`

use crate::constants::{CSV_EXTENSION, DEFAULT_VALUE_LABEL, JSON_DATA_FIELD, JSON_EXTENSION};
use crate::error::{Result, SweepError};
use crate::models::{DataFile, TimePoint, TimeSeries, extension_of};
use crate::schema::{ResolvedSchema, SchemaCandidates};
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::debug;

/// Read a data file using its resolved schema
pub fn read_data_file(file: &DataFile, candidates: &SchemaCandidates) -> Result<TimeSeries> {
    read_timeseries(&file.path, candidates)
}

/// Read and normalize a single measurement file. Dispatch by extension.
pub fn read_timeseries(path: &Path, candidates: &SchemaCandidates) -> Result<TimeSeries> {
    let ext = extension_of(path).unwrap_or_default();

    let mut series = match ext.as_str() {
        CSV_EXTENSION => read_csv(path, candidates)?,
        JSON_EXTENSION => read_json(path, candidates)?,
        other => {
            return Err(SweepError::file_format(
                path,
                format!("unsupported file extension '.{other}'"),
            ));
        }
    };

    // -0.0 and 0.0 compare equal so their input order survives
    series
        .points
        .sort_by(|a, b| (a.temperature + 0.0).total_cmp(&(b.temperature + 0.0)));

    debug!(
        "Read {} points ('{}') from {}",
        series.points.len(),
        series.value_label,
        path.display()
    );

    Ok(series)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn read_csv(path: &Path, candidates: &SchemaCandidates) -> Result<TimeSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SweepError::file_format(path, format!("cannot open CSV: {e}")))?;

    let headers = reader
        .headers()
        .map_err(|e| SweepError::file_format(path, format!("cannot read CSV header: {e}")))?
        .clone();

    let mut columns: Option<(ResolvedSchema, usize, usize)> = None;
    let mut points = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| SweepError::file_format(path, format!("CSV row {row_no}: {e}")))?;

        if columns.is_none() {
            let schema = candidates
                .resolve(&headers)
                .map_err(|e| SweepError::schema_resolution(path, e))?;
            let t_idx = column_index(&headers, &schema.temperature_key, path)?;
            let v_idx = column_index(&headers, &schema.value_key, path)?;
            columns = Some((schema, t_idx, v_idx));
        }

        if let Some((schema, t_idx, v_idx)) = &columns {
            let temperature = parse_number(
                record.get(*t_idx),
                path,
                row_no,
                &schema.temperature_key,
            )?;
            let value = parse_number(record.get(*v_idx), path, row_no, &schema.value_key)?;
            points.push(TimePoint::new(temperature, value));
        }
    }

    let value_label = columns
        .map(|(schema, _, _)| schema.value_key)
        .unwrap_or_else(|| DEFAULT_VALUE_LABEL.to_string());

    Ok(TimeSeries {
        value_label,
        points,
    })
}

/// Position of a resolved header. Duplicate names resolve to the last column.
fn column_index(headers: &csv::StringRecord, key: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == key)
        .map(|(i, _)| i)
        .last()
        .ok_or_else(|| SweepError::file_format(path, format!("no CSV column named '{key}'")))
}

fn parse_number(raw: Option<&str>, path: &Path, row: usize, key: &str) -> Result<f64> {
    let raw = raw.ok_or_else(|| {
        SweepError::file_format(path, format!("row {row}: missing field '{key}'"))
    })?;

    raw.trim().parse::<f64>().map_err(|_| {
        SweepError::file_format(
            path,
            format!("row {row}: field '{key}' is not a number: '{raw}'"),
        )
    })
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn read_json(path: &Path, candidates: &SchemaCandidates) -> Result<TimeSeries> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SweepError::file_format(path, format!("cannot read JSON: {e}")))?;
    let doc: JsonValue = serde_json::from_str(&text)
        .map_err(|e| SweepError::file_format(path, format!("invalid JSON: {e}")))?;

    let records = match &doc {
        JsonValue::Array(items) => items,
        JsonValue::Object(map) => match map.get(JSON_DATA_FIELD) {
            Some(JsonValue::Array(items)) => items,
            _ => {
                return Err(SweepError::file_format(
                    path,
                    format!("JSON object has no '{JSON_DATA_FIELD}' array"),
                ));
            }
        },
        _ => {
            return Err(SweepError::file_format(
                path,
                "JSON is neither an array nor an object",
            ));
        }
    };

    let first = records
        .first()
        .ok_or_else(|| SweepError::file_format(path, "JSON not a non-empty list"))?
        .as_object()
        .ok_or_else(|| SweepError::file_format(path, "record 0 is not a JSON object"))?;

    let schema = candidates
        .resolve(first)
        .map_err(|e| SweepError::schema_resolution(path, e))?;

    let points = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec.as_object().ok_or_else(|| {
                SweepError::file_format(path, format!("record {i} is not a JSON object"))
            })?;
            let temperature = json_number(
                obj.get(&schema.temperature_key),
                path,
                i,
                &schema.temperature_key,
            )?;
            let value = json_number(obj.get(&schema.value_key), path, i, &schema.value_key)?;
            Ok(TimePoint::new(temperature, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TimeSeries {
        value_label: schema.value_key,
        points,
    })
}

fn json_number(val: Option<&JsonValue>, path: &Path, row: usize, key: &str) -> Result<f64> {
    match val {
        Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(|| {
            SweepError::file_format(path, format!("row {row}: field '{key}' is out of range"))
        }),
        Some(JsonValue::String(s)) => parse_number(Some(s.as_str()), path, row, key),
        Some(other) => Err(SweepError::file_format(
            path,
            format!("row {row}: field '{key}' is not a number: {other}"),
        )),
        None => Err(SweepError::file_format(
            path,
            format!("row {row}: missing field '{key}'"),
        )),
    }
}
