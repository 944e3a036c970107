use crate::engine::catalog::{FieldCatalog, FieldType};
use crate::engine::eval::dates::{calendar_day, parse_timestamp, value_timestamp};
use crate::engine::operators::{split_range, Operator, SearchFilter};
use crate::engine::types::{parse_float, FieldValue, Record};
use chrono::NaiveDate;
use smol_str::SmolStr;

/// Text comparison on lower-cased values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextOp {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
}

/// Ordering comparison shared by numbers and timestamps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrderOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl OrderOp {
    #[inline]
    fn apply<T: PartialOrd>(self, left: T, right: T) -> bool {
        match self {
            OrderOp::Eq => left == right,
            OrderOp::Neq => left != right,
            OrderOp::Gt => left > right,
            OrderOp::Gte => left >= right,
            OrderOp::Lt => left < right,
            OrderOp::Lte => left <= right,
        }
    }
}

/// A filter value parsed once for its field type.
///
/// Numbers keep IEEE semantics: every comparison with NaN is false except
/// `Neq`. Dates use `None` for an invalid date, which fails every ordering.
#[derive(Clone, Debug, PartialEq)]
pub enum Criterion {
    Text { op: TextOp, needle: String },
    Empty,
    NotEmpty,
    Number { op: OrderOp, target: f64 },
    NumberRange { min: f64, max: f64 },
    Timestamp { op: OrderOp, target: Option<i64> },
    SameDay { target: Option<NaiveDate>, negate: bool },
    DateRange { start: Option<i64>, end: Option<i64> },
    Flag { expected: bool, negate: bool },
    /// Operator outside the field type's table, or a field of unknown type.
    Unconstrained,
    /// Field missing from the catalog, or a text comparison with no value.
    Unmatchable,
}

/// Stand-in for an absent filter value outside text comparisons.
static ABSENT: FieldValue = FieldValue::Null;

impl Criterion {
    /// `value` is `None` when the filter carried no value at all.
    pub fn compile(field_type: FieldType, operator: &str, value: Option<&FieldValue>) -> Self {
        let Ok(op) = operator.parse::<Operator>() else {
            return Criterion::Unconstrained;
        };
        let or_null = value.unwrap_or(&ABSENT);
        match field_type {
            FieldType::String => compile_text(op, value),
            FieldType::Number => compile_number(op, or_null),
            FieldType::Date => compile_date(op, or_null),
            FieldType::Boolean => compile_flag(op, or_null),
            FieldType::Unknown => Criterion::Unconstrained,
        }
    }

    /// Tests a present, non-null stored value.
    pub fn test(&self, actual: &FieldValue) -> bool {
        match self {
            Criterion::Text { op, needle } => {
                let hay = actual.display().to_lowercase();
                match op {
                    TextOp::Contains => hay.contains(needle.as_str()),
                    TextOp::NotContains => !hay.contains(needle.as_str()),
                    TextOp::Equals => hay == *needle,
                    TextOp::NotEquals => hay != *needle,
                    TextOp::StartsWith => hay.starts_with(needle.as_str()),
                    TextOp::EndsWith => hay.ends_with(needle.as_str()),
                }
            }
            Criterion::Empty => actual.display().trim().is_empty(),
            Criterion::NotEmpty => !actual.display().trim().is_empty(),
            Criterion::Number { op, target } => op.apply(actual.to_number(), *target),
            Criterion::NumberRange { min, max } => {
                let n = actual.to_number();
                n >= *min && n <= *max
            }
            Criterion::Timestamp { op, target } => match (value_timestamp(actual), target) {
                (Some(ts), Some(target)) => op.apply(ts, *target),
                _ => false,
            },
            Criterion::SameDay { target, negate } => {
                let day = value_timestamp(actual).and_then(calendar_day);
                let same = matches!((day, target), (Some(a), Some(b)) if a == *b);
                same != *negate
            }
            Criterion::DateRange { start, end } => {
                match (value_timestamp(actual), start, end) {
                    (Some(ts), Some(start), Some(end)) => ts >= *start && ts <= *end,
                    _ => false,
                }
            }
            Criterion::Flag { expected, negate } => (actual.truthy() == *expected) != *negate,
            Criterion::Unconstrained => true,
            Criterion::Unmatchable => false,
        }
    }
}

fn compile_text(op: Operator, value: Option<&FieldValue>) -> Criterion {
    let text_op = match op {
        Operator::IsEmpty => return Criterion::Empty,
        Operator::IsNotEmpty => return Criterion::NotEmpty,
        Operator::Contains => TextOp::Contains,
        Operator::NotContains => TextOp::NotContains,
        Operator::Equals => TextOp::Equals,
        Operator::NotEquals => TextOp::NotEquals,
        Operator::StartsWith => TextOp::StartsWith,
        Operator::EndsWith => TextOp::EndsWith,
        _ => return Criterion::Unconstrained,
    };
    let Some(value) = value else {
        return Criterion::Unmatchable;
    };
    Criterion::Text {
        op: text_op,
        needle: value.display().to_lowercase(),
    }
}

fn compile_number(op: Operator, value: &FieldValue) -> Criterion {
    let order_op = match op {
        Operator::Equals => OrderOp::Eq,
        Operator::NotEquals => OrderOp::Neq,
        Operator::GreaterThan => OrderOp::Gt,
        Operator::GreaterThanOrEqual => OrderOp::Gte,
        Operator::LessThan => OrderOp::Lt,
        Operator::LessThanOrEqual => OrderOp::Lte,
        Operator::Between => {
            let raw = range_text(value);
            let (min, max) = split_range(&raw);
            return Criterion::NumberRange {
                min: min.map_or(f64::NAN, parse_float),
                max: max.map_or(f64::NAN, parse_float),
            };
        }
        _ => return Criterion::Unconstrained,
    };
    Criterion::Number {
        op: order_op,
        target: value.to_number(),
    }
}

fn compile_date(op: Operator, value: &FieldValue) -> Criterion {
    let target = value_timestamp(value);
    let order_op = match op {
        Operator::Before => OrderOp::Lt,
        Operator::After => OrderOp::Gt,
        Operator::BeforeOrEquals => OrderOp::Lte,
        Operator::AfterOrEquals => OrderOp::Gte,
        Operator::Equals | Operator::NotEquals => {
            return Criterion::SameDay {
                target: target.and_then(calendar_day),
                negate: op == Operator::NotEquals,
            };
        }
        Operator::Between => {
            let raw = range_text(value);
            let (start, end) = split_range(&raw);
            return Criterion::DateRange {
                start: start.and_then(parse_timestamp),
                end: end.and_then(parse_timestamp),
            };
        }
        _ => return Criterion::Unconstrained,
    };
    Criterion::Timestamp {
        op: order_op,
        target,
    }
}

fn compile_flag(op: Operator, value: &FieldValue) -> Criterion {
    let expected = match value {
        FieldValue::Bool(b) => *b,
        FieldValue::Str(s) => s == "true",
        _ => false,
    };
    match op {
        Operator::Equals => Criterion::Flag {
            expected,
            negate: false,
        },
        Operator::NotEquals => Criterion::Flag {
            expected,
            negate: true,
        },
        _ => Criterion::Unconstrained,
    }
}

/// Range text of a `between` value; falsy values read as an empty range.
fn range_text(value: &FieldValue) -> String {
    if value.truthy() {
        value.display()
    } else {
        String::new()
    }
}

/// A [`SearchFilter`] resolved against the catalog, ready to test records.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFilter {
    pub field: SmolStr,
    pub criterion: Criterion,
}

impl CompiledFilter {
    pub fn compile(filter: &SearchFilter, catalog: &FieldCatalog) -> Self {
        let criterion = match catalog.field_type(&filter.field) {
            Some(field_type) => {
                Criterion::compile(field_type, &filter.operator, filter.value.as_ref())
            }
            None => Criterion::Unmatchable,
        };
        Self {
            field: filter.field.clone(),
            criterion,
        }
    }

    /// A missing or null field never matches, whatever the operator.
    #[inline]
    pub fn matches(&self, record: &Record) -> bool {
        match record.get(&self.field) {
            None | Some(FieldValue::Null) => false,
            Some(actual) => self.criterion.test(actual),
        }
    }
}

/// One-shot test of a single filter against a record, for a known field type.
pub fn matches(record: &Record, filter: &SearchFilter, field_type: FieldType) -> bool {
    CompiledFilter {
        field: filter.field.clone(),
        criterion: Criterion::compile(field_type, &filter.operator, filter.value.as_ref()),
    }
    .matches(record)
}
