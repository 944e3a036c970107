use crate::engine::types::FieldValue;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

/// How the filters of one query combine.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

/// One user-entered criterion. `id` only identifies the row in the client and
/// plays no part in evaluation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SearchFilter {
    #[serde(default)]
    pub id: SmolStr,
    pub field: SmolStr,
    /// Kept as text so that identifiers outside the operator tables survive
    /// the wire and are judged by the evaluator.
    pub operator: SmolStr,
    /// `None` when the wire object has no `value` key; an explicit `null`
    /// is `Some(FieldValue::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<FieldValue>,
}

impl SearchFilter {
    pub fn new(field: &str, operator: &str, value: impl Into<FieldValue>) -> Self {
        Self {
            id: SmolStr::default(),
            field: SmolStr::new(field),
            operator: SmolStr::new(operator),
            value: Some(value.into()),
        }
    }
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| Some(filter_value(v)))
}

/// Filter values arrive from form inputs; a list is read as its
/// comma-joined items so `[30, 40]` means the same range as `"30,40"`.
fn filter_value(value: Value) -> FieldValue {
    match value {
        Value::Array(items) => {
            let joined: Vec<String> = items
                .into_iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => filter_value(other).display(),
                })
                .collect();
            FieldValue::Str(joined.join(",").into())
        }
        other => FieldValue::from(other),
    }
}

/// Splits a `"low,high"` range into its two trimmed bounds.
///
/// Parts past the second are ignored; a missing bound comes back as `None`
/// and the caller decides what an absent bound means.
pub fn split_range(raw: &str) -> (Option<&str>, Option<&str>) {
    let mut parts = raw.split(',').map(str::trim);
    (parts.next(), parts.next())
}

#[cfg(test)]
mod predicate_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_range() {
        assert_eq!(split_range("30,40"), (Some("30"), Some("40")));
        assert_eq!(split_range(" 30 , 40 "), (Some("30"), Some("40")));
        assert_eq!(split_range("30"), (Some("30"), None));
        assert_eq!(split_range("1,2,3"), (Some("1"), Some("2")));
        assert_eq!(split_range(""), (Some(""), None));
    }

    #[test]
    fn test_filter_from_wire() {
        let filter: SearchFilter = serde_json::from_value(json!({
            "id": "f-1",
            "field": "age",
            "operator": "greater_than",
            "value": 30
        }))
        .unwrap();
        assert_eq!(filter.id, "f-1");
        assert_eq!(filter.operator, "greater_than");
        assert_eq!(filter.value, Some(FieldValue::Number(30.0)));
    }

    #[test]
    fn test_filter_optional_fields() {
        let filter: SearchFilter = serde_json::from_value(json!({
            "field": "email",
            "operator": "is_empty"
        }))
        .unwrap();
        assert!(filter.id.is_empty());
        assert_eq!(filter.value, None);
        assert!(serde_json::to_value(&filter).unwrap().get("value").is_none());
    }

    #[test]
    fn test_filter_explicit_null_value() {
        let filter: SearchFilter = serde_json::from_value(json!({
            "field": "name",
            "operator": "contains",
            "value": null
        }))
        .unwrap();
        assert_eq!(filter.value, Some(FieldValue::Null));
    }

    #[test]
    fn test_filter_list_value_is_comma_joined() {
        let filter: SearchFilter = serde_json::from_value(json!({
            "field": "age",
            "operator": "between",
            "value": [30, 40]
        }))
        .unwrap();
        assert_eq!(filter.value, Some(FieldValue::from("30,40")));

        let filter: SearchFilter = serde_json::from_value(json!({
            "field": "tags",
            "operator": "contains",
            "value": ["a", null, [true, 2.5]]
        }))
        .unwrap();
        assert_eq!(filter.value, Some(FieldValue::from("a,,true,2.5")));
    }

    #[test]
    fn test_combinator_wire_names() {
        assert_eq!(serde_json::to_value(Combinator::Or).unwrap(), json!("or"));
        let parsed: Combinator = serde_json::from_value(json!("and")).unwrap();
        assert_eq!(parsed, Combinator::And);
        assert!(serde_json::from_value::<Combinator>(json!("xor")).is_err());
    }
}
