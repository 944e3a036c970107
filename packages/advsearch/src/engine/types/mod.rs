mod field_value;
mod record;

pub use field_value::{format_number, parse_float, FieldValue};
pub use record::{record_from_json, FastMap, Record};
