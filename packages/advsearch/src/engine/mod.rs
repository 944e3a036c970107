pub mod catalog;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod operators;
pub mod query;
pub mod response;
pub mod types;

pub use catalog::{default_catalog, FieldCatalog, FieldDefinition, FieldType};
pub use error::QueryError;
pub use evaluator::{evaluate, matching, CompiledQuery};
pub use operators::{
    needs_value_input, operators_for_type, Combinator, FilterOperator, Operator, SearchFilter,
};
pub use query::{SearchQuery, SortOrder};
pub use response::SearchResponse;
pub use types::{FieldValue, Record};
