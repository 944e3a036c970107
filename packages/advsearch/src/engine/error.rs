use crate::engine::catalog::FieldType;
use smol_str::SmolStr;
use thiserror::Error;

/// Rejections at the query boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("page size must be positive")]
    InvalidPageSize,

    #[error("page numbers start at 1")]
    InvalidPage,

    #[error("unknown field `{0}`")]
    UnknownField(SmolStr),

    #[error("operator `{operator}` is not available for {field_type} field `{field}`")]
    UnsupportedOperator {
        field: SmolStr,
        operator: SmolStr,
        field_type: FieldType,
    },

    #[error("operator `{operator}` on field `{field}` needs a value")]
    MissingValue { field: SmolStr, operator: SmolStr },
}
