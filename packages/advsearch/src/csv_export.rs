//! CSV rendering of search results.

use crate::engine::catalog::FieldCatalog;
use crate::engine::types::Record;
use anyhow::{Context, Result};

/// One CSV cell: the value's display form, or empty for missing and null.
fn cell(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(v) if !v.is_null() => v.display(),
        _ => String::new(),
    }
}

/// Renders records as CSV with one column per catalog field.
///
/// The header row carries the catalog labels; it is written even when
/// there are no records.
pub fn to_csv<'a, I>(records: I, catalog: &FieldCatalog) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(catalog.definitions().iter().map(|d| d.label.as_str()))
        .context("Failed to write CSV header")?;

    for record in records {
        let row: Vec<String> = catalog
            .definitions()
            .iter()
            .map(|d| cell(record, &d.field))
            .collect();
        wtr.write_record(&row).context("Failed to write CSV row")?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
