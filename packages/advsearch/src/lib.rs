// src/lib.rs

pub mod csv_export;
pub mod engine;
pub mod loader;
pub mod service;

// Re-export commonly used types for convenience
pub use engine::catalog::{default_catalog, FieldCatalog, FieldDefinition, FieldType};
pub use engine::error::QueryError;
pub use engine::eval::matches;
pub use engine::evaluator::{evaluate, matching};
pub use engine::operators::{
    needs_value_input, operators_for_type, Combinator, FilterOperator, Operator, SearchFilter,
};
pub use engine::query::{SearchQuery, SortOrder};
pub use engine::response::SearchResponse;
pub use engine::types::{FieldValue, Record};
