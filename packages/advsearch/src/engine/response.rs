use crate::engine::types::Record;
use serde::{Deserialize, Serialize};

/// One page of results plus the pre-pagination match count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub data: Vec<Record>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl SearchResponse {
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}
