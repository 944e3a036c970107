use crate::engine::catalog::FieldCatalog;
use crate::engine::error::QueryError;
use crate::engine::operators::{Combinator, Operator, SearchFilter};
use crate::engine::types::FieldValue;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One search request. Missing wire fields take the defaults of [`SearchQuery::default`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    pub text: String,
    pub filters: Vec<SearchFilter>,
    pub combinator: Combinator,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub sort_field: SmolStr,
    pub sort_order: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            filters: Vec::new(),
            combinator: Combinator::And,
            page: 1,
            page_size: 10,
            sort_field: SmolStr::new_static("id"),
            sort_order: SortOrder::Asc,
        }
    }
}

impl SearchQuery {
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn with_sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort_field = SmolStr::new(field);
        self.sort_order = order;
        self
    }

    /// Rejects queries the evaluator would otherwise answer permissively:
    /// unknown fields, operators outside the field's table and missing values.
    pub fn validate(&self, catalog: &FieldCatalog) -> Result<(), QueryError> {
        check_paging(self.page, self.page_size)?;

        for filter in &self.filters {
            let def = catalog
                .get(&filter.field)
                .ok_or_else(|| QueryError::UnknownField(filter.field.clone()))?;

            let operator = filter
                .operator
                .parse::<Operator>()
                .ok()
                .filter(|op| op.is_legal_for(def.field_type))
                .ok_or_else(|| QueryError::UnsupportedOperator {
                    field: filter.field.clone(),
                    operator: filter.operator.clone(),
                    field_type: def.field_type,
                })?;

            let blank = filter.value.as_ref().is_none_or(FieldValue::is_blank);
            if operator.needs_value() && blank {
                return Err(QueryError::MissingValue {
                    field: filter.field.clone(),
                    operator: filter.operator.clone(),
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_paging(page: usize, page_size: usize) -> Result<(), QueryError> {
    if page_size == 0 {
        return Err(QueryError::InvalidPageSize);
    }
    if page == 0 {
        return Err(QueryError::InvalidPage);
    }
    Ok(())
}
