//! Trait abstraction for catalog sources so selectors can be driven by mocks in tests

use crate::state::{CatalogRecord, CustomEntryInput};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Narrowing filters applied by the catalog before paging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilters {
    pub subject_area: Option<String>,
    pub repository_type: Option<String>,
}

impl CatalogFilters {
    pub fn is_empty(&self) -> bool {
        self.subject_area.is_none() && self.repository_type.is_none()
    }
}

/// A single page request against a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub search_term: Option<String>,
    #[serde(flatten)]
    pub filters: CatalogFilters,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<R> {
    pub items: Vec<R>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<R> CatalogPage<R> {
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: 1,
            page_size,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.total_count.div_ceil(self.page_size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Pagination text shown under the result list, even when it is empty
    pub fn summary(&self) -> String {
        let noun = if self.total_count == 1 {
            "result"
        } else {
            "results"
        };
        format!(
            "Page {} of {} ({} {})",
            self.page,
            self.total_pages(),
            self.total_count,
            noun
        )
    }
}

/// Source of paginated, searchable catalog records
#[async_trait]
pub trait CatalogSource<R: CatalogRecord>: Send + Sync {
    /// Fetch one page of records matching the query
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<CatalogPage<R>>;

    /// Persist a user-authored entry and return the stored record
    async fn create_custom_entry(&self, input: &CustomEntryInput) -> Result<R>;
}
