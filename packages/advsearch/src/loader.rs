//! Reading datasets and field catalogs from JSON.

use crate::engine::catalog::{FieldCatalog, FieldDefinition};
use crate::engine::types::{record_from_json, Record};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub(crate) const SAMPLE_EMPLOYEES: &str = include_str!("../data/employees.json");

/// Parses a JSON array of objects into records tagged against `catalog`.
///
/// Elements that are not objects are skipped.
pub fn parse_records(json: &str, catalog: &FieldCatalog) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json).context("Dataset is not valid JSON")?;
    let items = match value {
        Value::Array(items) => items,
        other => bail!("Dataset must be a JSON array, found {}", kind(&other)),
    };

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    for (i, item) in items.into_iter().enumerate() {
        match record_from_json(item) {
            Ok(mut record) => {
                catalog.tag_record(&mut record);
                records.push(record);
            }
            Err(e) => warn!(index = i, error = %e, "Skipping dataset element"),
        }
    }

    debug!(loaded = records.len(), skipped = total - records.len(), "Parsed dataset");
    Ok(records)
}

pub fn read_records(path: &Path, catalog: &FieldCatalog) -> Result<Vec<Record>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    parse_records(&json, catalog).with_context(|| format!("Invalid dataset {}", path.display()))
}

/// Reads a JSON array of `{field, label, type}` definitions.
pub fn read_catalog(path: &Path) -> Result<FieldCatalog> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let definitions: Vec<FieldDefinition> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    if definitions.is_empty() {
        warn!(path = %path.display(), "Catalog has no fields");
    }
    Ok(FieldCatalog::new(definitions))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod loader_tests {
    use super::*;
    use crate::engine::catalog::default_catalog;
    use crate::engine::types::FieldValue;

    #[test]
    fn test_sample_parses() {
        let records = parse_records(SAMPLE_EMPLOYEES, default_catalog()).unwrap();
        assert_eq!(records.len(), 30);
        assert!(matches!(records[0]["createdAt"], FieldValue::Date(_)));
        assert!(matches!(records[0]["name"], FieldValue::Str(_)));
    }

    #[test]
    fn test_non_objects_are_skipped() {
        let records = parse_records(r#"[{"id": 1}, 7, "x", {"id": 2}]"#, default_catalog()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = parse_records(r#"{"id": 1}"#, default_catalog()).unwrap_err();
        assert!(err.to_string().contains("an object"));
        assert!(parse_records("not json", default_catalog()).is_err());
    }
}
