use super::field_value::FieldValue;
use anyhow::{bail, Result};
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use serde_json::Value;
use smol_str::SmolStr;
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// One dataset row. Key order is the order the fields arrived in and
/// survives serialization back to JSON.
pub type Record = IndexMap<SmolStr, FieldValue>;

/// Converts a JSON object into a [`Record`]; anything else is rejected.
pub fn record_from_json(value: Value) -> Result<Record> {
    match value {
        Value::Object(obj) => Ok(obj
            .into_iter()
            .map(|(k, v)| (SmolStr::from(k), FieldValue::from(v)))
            .collect()),
        other => bail!("Expected a JSON object for a record, found {}", other),
    }
}

#[cfg(test)]
mod record_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_key_order() {
        let record = record_from_json(json!({
            "id": 1,
            "name": "Alice",
            "isActive": true,
        }))
        .unwrap();

        let keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "name", "isActive"]);
        assert_eq!(record["name"], FieldValue::from("Alice"));
    }

    #[test]
    fn test_record_rejects_non_object() {
        assert!(record_from_json(json!([1, 2, 3])).is_err());
        assert!(record_from_json(json!("text")).is_err());
    }
}
