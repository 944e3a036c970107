use crate::engine::catalog::{FieldCatalog, FieldType};
use crate::engine::error::QueryError;
use crate::engine::eval::{CompiledFilter, SortKey};
use crate::engine::operators::Combinator;
use crate::engine::query::{check_paging, SearchQuery, SortOrder};
use crate::engine::response::SearchResponse;
use crate::engine::types::Record;
use smol_str::SmolStr;
use tracing::debug;

/// A [`SearchQuery`] with its text lower-cased and filters compiled, so each
/// record is tested without re-parsing anything.
#[derive(Clone, Debug)]
pub struct CompiledQuery {
    needle: Option<String>,
    filters: Vec<CompiledFilter>,
    combinator: Combinator,
    sort_field: SmolStr,
    sort_type: Option<FieldType>,
    sort_order: SortOrder,
}

impl CompiledQuery {
    pub fn compile(query: &SearchQuery, catalog: &FieldCatalog) -> Self {
        let needle = (!query.text.trim().is_empty()).then(|| query.text.to_lowercase());
        Self {
            needle,
            filters: query
                .filters
                .iter()
                .map(|f| CompiledFilter::compile(f, catalog))
                .collect(),
            combinator: query.combinator,
            sort_field: query.sort_field.clone(),
            sort_type: catalog.field_type(&query.sort_field),
            sort_order: query.sort_order,
        }
    }

    /// Text match: some field's string form contains the lower-cased text.
    pub fn matches_text(&self, record: &Record) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => record
                .values()
                .any(|v| v.display().to_lowercase().contains(needle.as_str())),
        }
    }

    pub fn matches_filters(&self, record: &Record) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        match self.combinator {
            Combinator::And => self.filters.iter().all(|f| f.matches(record)),
            Combinator::Or => self.filters.iter().any(|f| f.matches(record)),
        }
    }

    pub fn keep(&self, record: &Record) -> bool {
        self.matches_text(record) && self.matches_filters(record)
    }

    /// Stable sort; descending reverses the ascending comparator.
    pub fn sort<'a>(&self, records: Vec<&'a Record>) -> Vec<&'a Record> {
        let mut keyed: Vec<(SortKey, &Record)> = records
            .into_iter()
            .map(|r| (SortKey::of(r.get(&self.sort_field), self.sort_type), r))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            let cmp = a.compare(b);
            match self.sort_order {
                SortOrder::Asc => cmp,
                SortOrder::Desc => cmp.reverse(),
            }
        });

        keyed.into_iter().map(|(_, r)| r).collect()
    }
}

/// Every record that passes the text and criteria filters, sorted, unpaginated.
pub fn matching<'a>(
    records: &'a [Record],
    query: &SearchQuery,
    catalog: &FieldCatalog,
) -> Vec<&'a Record> {
    let compiled = CompiledQuery::compile(query, catalog);
    let kept: Vec<&Record> = records.iter().filter(|r| compiled.keep(r)).collect();
    debug!(
        scanned = records.len(),
        kept = kept.len(),
        filters = query.filters.len(),
        "Filtered records"
    );
    compiled.sort(kept)
}

/// Runs one query over the dataset and returns the requested page.
///
/// A page past the end is empty; `total` and `total_pages` still describe the
/// whole match set.
pub fn evaluate(
    records: &[Record],
    query: &SearchQuery,
    catalog: &FieldCatalog,
) -> Result<SearchResponse, QueryError> {
    check_paging(query.page, query.page_size)?;

    let matched = matching(records, query, catalog);
    let total = matched.len();
    let start = (query.page - 1).saturating_mul(query.page_size);

    let data: Vec<Record> = matched
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .cloned()
        .collect();

    Ok(SearchResponse {
        data,
        total,
        page: query.page,
        page_size: query.page_size,
        total_pages: total.div_ceil(query.page_size),
    })
}
