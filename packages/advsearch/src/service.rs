use crate::engine::catalog::{FieldCatalog, FieldDefinition, FieldType};
use crate::engine::evaluator;
use crate::engine::operators::{operators_for_type, FilterOperator};
use crate::engine::query::SearchQuery;
use crate::engine::response::SearchResponse;
use crate::engine::types::Record;
use crate::{csv_export, loader};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};

pub mod fields {
    use super::*;

    /// Every searchable field, in catalog order.
    pub fn list(catalog: &FieldCatalog) -> &[FieldDefinition] {
        catalog.definitions()
    }

    /// Operators offered for `field`; an unknown field gets the string table.
    pub fn operators_for_field(catalog: &FieldCatalog, field: &str) -> &'static [FilterOperator] {
        operators_for_type(catalog.field_type(field).unwrap_or(FieldType::String))
    }
}

pub mod search {
    use super::*;

    /// Evaluates one query. With `strict`, the query is validated against the
    /// catalog before anything is evaluated.
    #[instrument(skip(records, query, catalog), fields(records = records.len()))]
    pub fn run(
        records: &[Record],
        query: &SearchQuery,
        catalog: &FieldCatalog,
        strict: bool,
    ) -> Result<SearchResponse> {
        if strict {
            query.validate(catalog).context("Query rejected")?;
        }
        let response = evaluator::evaluate(records, query, catalog)?;
        debug!(
            total = response.total,
            page = response.page,
            total_pages = response.total_pages,
            "Search complete"
        );
        Ok(response)
    }

    /// Same as [`run`] with the query and response as JSON.
    #[instrument(skip_all)]
    pub fn run_json(
        records: &[Record],
        query: Value,
        catalog: &FieldCatalog,
        strict: bool,
    ) -> Result<Value> {
        let query: SearchQuery = serde_json::from_value(query).context("Malformed search query")?;
        let response = run(records, &query, catalog, strict)?;
        Ok(serde_json::to_value(response)?)
    }
}

pub mod export {
    use super::*;

    /// Every match of `query` as CSV, ignoring the query's paging.
    #[instrument(skip(records, query, catalog), fields(records = records.len()))]
    pub fn run(records: &[Record], query: &SearchQuery, catalog: &FieldCatalog) -> Result<String> {
        let matched = evaluator::matching(records, query, catalog);
        debug!(rows = matched.len(), "Exporting matches");
        csv_export::to_csv(matched, catalog)
    }
}

pub mod dataset {
    use super::*;

    /// The built-in employee sample, tagged against `catalog`.
    pub fn sample(catalog: &FieldCatalog) -> Result<Vec<Record>> {
        loader::parse_records(loader::SAMPLE_EMPLOYEES, catalog)
    }

    pub fn from_json_str(json: &str, catalog: &FieldCatalog) -> Result<Vec<Record>> {
        loader::parse_records(json, catalog)
    }

    #[instrument(skip(catalog))]
    pub fn from_path(path: &Path, catalog: &FieldCatalog) -> Result<Vec<Record>> {
        loader::read_records(path, catalog)
    }

    #[instrument]
    pub fn catalog_from_path(path: &Path) -> Result<FieldCatalog> {
        loader::read_catalog(path)
    }
}
