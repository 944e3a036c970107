use crate::engine::catalog::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every operator identifier a filter may carry.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    Before,
    After,
    BeforeOrEquals,
    AfterOrEquals,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThan => "less_than",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::Between => "between",
            Operator::Before => "before",
            Operator::After => "after",
            Operator::BeforeOrEquals => "before_or_equals",
            Operator::AfterOrEquals => "after_or_equals",
        }
    }

    /// False only for the operators that test emptiness.
    pub fn needs_value(&self) -> bool {
        !matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }

    pub fn is_legal_for(&self, field_type: FieldType) -> bool {
        operators_for_type(field_type)
            .iter()
            .any(|entry| entry.operator == *self)
    }
}

impl FromStr for Operator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(Operator::Contains),
            "not_contains" => Ok(Operator::NotContains),
            "equals" => Ok(Operator::Equals),
            "not_equals" => Ok(Operator::NotEquals),
            "starts_with" => Ok(Operator::StartsWith),
            "ends_with" => Ok(Operator::EndsWith),
            "is_empty" => Ok(Operator::IsEmpty),
            "is_not_empty" => Ok(Operator::IsNotEmpty),
            "greater_than" => Ok(Operator::GreaterThan),
            "greater_than_or_equal" => Ok(Operator::GreaterThanOrEqual),
            "less_than" => Ok(Operator::LessThan),
            "less_than_or_equal" => Ok(Operator::LessThanOrEqual),
            "between" => Ok(Operator::Between),
            "before" => Ok(Operator::Before),
            "after" => Ok(Operator::After),
            "before_or_equals" => Ok(Operator::BeforeOrEquals),
            "after_or_equals" => Ok(Operator::AfterOrEquals),
            _ => anyhow::bail!("Invalid filter operator: {}", s),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an operator identifier takes a value. Unrecognised identifiers do.
pub fn needs_value_input(operator: &str) -> bool {
    !matches!(operator, "is_empty" | "is_not_empty")
}

/// One row of an operator table: identifier plus display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterOperator {
    pub operator: Operator,
    pub label: &'static str,
}

impl Serialize for FilterOperator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("FilterOperator", 2)?;
        state.serialize_field("value", self.operator.as_str())?;
        state.serialize_field("label", self.label)?;
        state.end()
    }
}

const fn op(operator: Operator, label: &'static str) -> FilterOperator {
    FilterOperator { operator, label }
}

pub const STRING_OPERATORS: &[FilterOperator] = &[
    op(Operator::Contains, "contains"),
    op(Operator::NotContains, "does not contain"),
    op(Operator::Equals, "equals"),
    op(Operator::NotEquals, "does not equal"),
    op(Operator::StartsWith, "starts with"),
    op(Operator::EndsWith, "ends with"),
    op(Operator::IsEmpty, "is empty"),
    op(Operator::IsNotEmpty, "is not empty"),
];

pub const NUMBER_OPERATORS: &[FilterOperator] = &[
    op(Operator::Equals, "= equals"),
    op(Operator::NotEquals, "≠ not equals"),
    op(Operator::GreaterThan, "> greater than"),
    op(Operator::GreaterThanOrEqual, "≥ greater than or equal"),
    op(Operator::LessThan, "< less than"),
    op(Operator::LessThanOrEqual, "≤ less than or equal"),
    op(Operator::Between, "between (min,max)"),
];

pub const DATE_OPERATORS: &[FilterOperator] = &[
    op(Operator::Before, "before"),
    op(Operator::After, "after"),
    op(Operator::Equals, "on date"),
    op(Operator::NotEquals, "not on date"),
    op(Operator::BeforeOrEquals, "on or before"),
    op(Operator::AfterOrEquals, "on or after"),
    op(Operator::Between, "between (date1,date2)"),
];

pub const BOOLEAN_OPERATORS: &[FilterOperator] = &[
    op(Operator::Equals, "is"),
    op(Operator::NotEquals, "is not"),
];

/// Ordered operator table for a field type; unknown types get the string set.
pub fn operators_for_type(field_type: FieldType) -> &'static [FilterOperator] {
    match field_type {
        FieldType::String | FieldType::Unknown => STRING_OPERATORS,
        FieldType::Number => NUMBER_OPERATORS,
        FieldType::Date => DATE_OPERATORS,
        FieldType::Boolean => BOOLEAN_OPERATORS,
    }
}

#[cfg(test)]
mod operator_tests {
    use super::*;

    #[test]
    fn test_tables_are_ordered() {
        let ids = |ty| -> Vec<&'static str> {
            operators_for_type(ty)
                .iter()
                .map(|o| o.operator.as_str())
                .collect()
        };
        assert_eq!(
            ids(FieldType::String),
            vec![
                "contains",
                "not_contains",
                "equals",
                "not_equals",
                "starts_with",
                "ends_with",
                "is_empty",
                "is_not_empty"
            ]
        );
        assert_eq!(ids(FieldType::Number).last(), Some(&"between"));
        assert_eq!(ids(FieldType::Date)[0], "before");
        assert_eq!(ids(FieldType::Boolean), vec!["equals", "not_equals"]);
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        assert_eq!(operators_for_type(FieldType::Unknown), STRING_OPERATORS);
    }

    #[test]
    fn test_every_table_non_empty() {
        for ty in [
            FieldType::String,
            FieldType::Number,
            FieldType::Date,
            FieldType::Boolean,
            FieldType::Unknown,
        ] {
            assert!(!operators_for_type(ty).is_empty());
        }
    }

    #[test]
    fn test_parse_round_trips_identifiers() {
        for table in [STRING_OPERATORS, NUMBER_OPERATORS, DATE_OPERATORS] {
            for entry in table {
                let parsed: Operator = entry.operator.as_str().parse().unwrap();
                assert_eq!(parsed, entry.operator);
            }
        }
        assert!("like".parse::<Operator>().is_err());
    }

    #[test]
    fn test_needs_value_input() {
        assert!(!needs_value_input("is_empty"));
        assert!(!needs_value_input("is_not_empty"));
        assert!(needs_value_input("contains"));
        assert!(needs_value_input("between"));
        assert!(needs_value_input("whatever"));
        assert!(!Operator::IsEmpty.needs_value());
        assert!(Operator::Before.needs_value());
    }

    #[test]
    fn test_legality() {
        assert!(Operator::Between.is_legal_for(FieldType::Number));
        assert!(Operator::Between.is_legal_for(FieldType::Date));
        assert!(!Operator::Between.is_legal_for(FieldType::String));
        assert!(!Operator::Contains.is_legal_for(FieldType::Boolean));
        assert!(Operator::IsEmpty.is_legal_for(FieldType::Unknown));
    }

    #[test]
    fn test_filter_operator_wire_shape() {
        let json = serde_json::to_value(BOOLEAN_OPERATORS).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "value": "equals", "label": "is" },
                { "value": "not_equals", "label": "is not" }
            ])
        );
    }
}
