//! Schema resolution for heterogeneous measurement files.
//!
//! Contributors name their columns inconsistently (`T`, `temp`,
//! `Temperature`, ...). The resolver picks the temperature and value fields
//! of a record from two priority-ordered candidate lists:
//!
//! 1. exact, case-sensitive match, candidates tried in order
//! 2. case-insensitive match against a lowercased index of the record's
//!    field names, candidates tried in the same order
//!
//! When both passes miss, resolution fails with [`SchemaError`] instead of
//! substituting a default.

use crate::constants::{TEMPERATURE_KEYS, VALUE_KEYS};
use crate::error::{FieldRole, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Anything exposing the field names of one parsed record
pub trait FieldNames {
    /// Field names in record order
    fn field_names(&self) -> Vec<&str>;
}

impl FieldNames for csv::StringRecord {
    fn field_names(&self) -> Vec<&str> {
        self.iter().collect()
    }
}

impl FieldNames for serde_json::Map<String, serde_json::Value> {
    fn field_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

impl FieldNames for [&str] {
    fn field_names(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl<const N: usize> FieldNames for [&str; N] {
    fn field_names(&self) -> Vec<&str> {
        self.to_vec()
    }
}

/// Priority-ordered candidate names for both fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCandidates {
    pub temperature: Vec<String>,
    pub value: Vec<String>,
}

impl Default for SchemaCandidates {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_KEYS.iter().map(|k| k.to_string()).collect(),
            value: VALUE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl SchemaCandidates {
    pub fn new(temperature: Vec<String>, value: Vec<String>) -> Self {
        Self { temperature, value }
    }

    /// Resolve both keys of `record` against these candidates
    pub fn resolve<R: FieldNames + ?Sized>(
        &self,
        record: &R,
    ) -> Result<ResolvedSchema, SchemaError> {
        resolve(record, &self.temperature, &self.value)
    }
}

/// Field names chosen for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub temperature_key: String,
    pub value_key: String,
}

/// Resolve the temperature and value keys of `record`
pub fn resolve<R, S>(
    record: &R,
    temperature_candidates: &[S],
    value_candidates: &[S],
) -> Result<ResolvedSchema, SchemaError>
where
    R: FieldNames + ?Sized,
    S: AsRef<str>,
{
    let names = record.field_names();
    let temperature_key = pick_key(&names, temperature_candidates, FieldRole::Temperature)?;
    let value_key = pick_key(&names, value_candidates, FieldRole::Value)?;

    debug!(
        "Resolved schema: temperature='{}', value='{}'",
        temperature_key, value_key
    );

    Ok(ResolvedSchema {
        temperature_key,
        value_key,
    })
}

/// Pick one field name from `candidates`, exact pass before case-insensitive pass
pub fn pick_key<S: AsRef<str>>(
    names: &[&str],
    candidates: &[S],
    role: FieldRole,
) -> Result<String, SchemaError> {
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if names.contains(&candidate) {
            return Ok(candidate.to_string());
        }
    }

    // Later fields overwrite earlier ones that lowercase to the same key
    let lowered: HashMap<String, &str> = names
        .iter()
        .map(|name| (name.to_lowercase(), *name))
        .collect();

    for candidate in candidates {
        if let Some(original) = lowered.get(&candidate.as_ref().to_lowercase()) {
            return Ok(original.to_string());
        }
    }

    Err(SchemaError::NoMatchingField {
        role,
        candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_follows_candidate_order() {
        let record = ["Temp", "temperature", "resistance", "value"];
        let resolved = SchemaCandidates::default().resolve(&record).unwrap();

        assert_eq!(resolved.temperature_key, "temperature");
        assert_eq!(resolved.value_key, "value");
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let record = ["temperature", "VALUE"];
        let resolved = SchemaCandidates::default().resolve(&record).unwrap();

        assert_eq!(resolved.temperature_key, "temperature");
        assert_eq!(resolved.value_key, "VALUE");
    }

    #[test]
    fn test_exact_pass_beats_earlier_case_insensitive_candidate() {
        // "value" would match "VALUE" case-insensitively, but "rho" matches
        // exactly and the exact pass runs first
        let record = ["T", "VALUE", "rho"];
        let resolved = SchemaCandidates::default().resolve(&record).unwrap();

        assert_eq!(resolved.temperature_key, "T");
        assert_eq!(resolved.value_key, "rho");
    }

    #[test]
    fn test_fallback_returns_original_spelling() {
        let record = ["TEMP", "Resistance"];
        let resolved = SchemaCandidates::default().resolve(&record).unwrap();

        assert_eq!(resolved.temperature_key, "TEMP");
        assert_eq!(resolved.value_key, "Resistance");
    }

    #[test]
    fn test_lowercase_collision_keeps_last_field() {
        let names = ["TEMPERATURE", "TemPerature"];
        let key = pick_key(&names, &["temperature"], FieldRole::Temperature).unwrap();
        assert_eq!(key, "TemPerature");
    }

    #[test]
    fn test_missing_temperature_fails() {
        let record = ["time", "value"];
        let err = SchemaCandidates::default().resolve(&record).unwrap_err();

        match err {
            SchemaError::NoMatchingField { role, candidates } => {
                assert_eq!(role, FieldRole::Temperature);
                assert_eq!(candidates.len(), TEMPERATURE_KEYS.len());
            }
        }
    }

    #[test]
    fn test_missing_value_fails() {
        let record = ["T", "voltage"];
        let err = SchemaCandidates::default().resolve(&record).unwrap_err();

        assert!(matches!(
            err,
            SchemaError::NoMatchingField {
                role: FieldRole::Value,
                ..
            }
        ));
        assert!(err.to_string().contains("no value field"));
    }

    #[test]
    fn test_custom_candidates() {
        let candidates = SchemaCandidates::new(vec!["kelvin".into()], vec!["ohms".into()]);
        let record = ["Kelvin", "OHMS", "value"];
        let resolved = candidates.resolve(&record).unwrap();

        assert_eq!(resolved.temperature_key, "Kelvin");
        assert_eq!(resolved.value_key, "OHMS");
    }

    #[test]
    fn test_json_object_field_names() {
        let record: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"Temp": 10, "Transmittance": 0.5}"#).unwrap();
        let resolved = SchemaCandidates::default().resolve(&record).unwrap();

        assert_eq!(resolved.temperature_key, "Temp");
        assert_eq!(resolved.value_key, "Transmittance");
    }
}
