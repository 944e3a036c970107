//! Shared fixtures for the advsearch integration tests.

#![allow(dead_code)]

use advsearch::engine::types::record_from_json;
use advsearch::service::dataset;
use advsearch::{default_catalog, Record, SearchFilter, SearchQuery, SearchResponse};
use serde_json::Value;

/// The built-in 30-employee sample.
pub fn employees() -> Vec<Record> {
    dataset::sample(default_catalog()).expect("sample dataset parses")
}

/// Records from JSON fixtures, tagged against the default catalog.
pub fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| {
            let mut record = record_from_json(v).expect("fixture is an object");
            default_catalog().tag_record(&mut record);
            record
        })
        .collect()
}

pub fn filter(field: &str, operator: &str, value: &str) -> SearchFilter {
    SearchFilter::new(field, operator, value)
}

/// Runs a query against the default catalog.
pub fn search(records: &[Record], query: &SearchQuery) -> SearchResponse {
    advsearch::evaluate(records, query, default_catalog()).expect("query evaluates")
}

/// Everything a query matches, in result order, as record ids.
pub fn matching_ids(records: &[Record], query: &SearchQuery) -> Vec<i64> {
    advsearch::matching(records, query, default_catalog())
        .into_iter()
        .map(id_of)
        .collect()
}

pub fn id_of(record: &Record) -> i64 {
    record["id"].as_f64().map(|n| n as i64).unwrap_or(-1)
}
