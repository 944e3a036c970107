use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use smol_str::SmolStr;

/// Scalar stored under one field of a [`Record`](super::Record).
///
/// `Date` keeps the original ISO-8601 text; parsing happens when a date
/// predicate or sort needs the timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(SmolStr),
    Date(SmolStr),
}

impl FieldValue {
    /// The stored number, without coercion.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Blank means null or a whitespace-only string.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Str(s) | FieldValue::Date(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Boolean coercion: `false`, `0`, `NaN`, `""` and null are false.
    pub fn truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Str(s) | FieldValue::Date(s) => !s.is_empty(),
        }
    }

    /// String form used by text search, string predicates and CSV cells.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Null => "null".to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Str(s) | FieldValue::Date(s) => s.to_string(),
        }
    }

    /// Numeric coercion; booleans and null have no numeric form.
    pub fn to_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Str(s) | FieldValue::Date(s) => parse_float(s),
            FieldValue::Null | FieldValue::Bool(_) => f64::NAN,
        }
    }
}

/// Formats a number the way a JSON client would print it back:
/// integral values carry no fractional part and negative zero prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Parses the longest numeric prefix of `raw`, yielding NaN when there is none.
///
/// Leading whitespace is skipped; `"12abc"` is 12, `"1e3x"` is 1000,
/// `"-Infinity"` is negative infinity and `"abc"` is NaN.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => FieldValue::Str(SmolStr::from(s)),
            // Records hold scalars; nested structures are kept as their JSON text.
            other @ (Value::Array(_) | Value::Object(_)) => {
                FieldValue::Str(SmolStr::from(other.to_string()))
            }
        }
    }
}

impl From<FieldValue> for Value {
    fn from(val: FieldValue) -> Self {
        match val {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 => {
                json!(n as i64)
            }
            FieldValue::Number(n) => json!(n),
            FieldValue::Str(s) | FieldValue::Date(s) => Value::String(s.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(SmolStr::new(s))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}
