//! In-memory catalog backed by a JSON reference dataset
//!
//! This is the catalog the terminal editor uses. It answers page requests the
//! way a remote catalog service would: filter, search, then slice.

use super::seed;
use super::traits::{CatalogPage, CatalogQuery, CatalogSource};
use crate::state::{CatalogRecord, CustomEntryInput, MetadataStandard, RecordId, Repository};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Reference dataset file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub metadata_standards: Vec<MetadataStandard>,
}

impl CatalogData {
    /// Load a dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let data: CatalogData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        tracing::info!(
            repositories = data.repositories.len(),
            metadata_standards = data.metadata_standards.len(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(data)
    }

    /// Built-in dataset used when no catalog file is configured
    pub fn builtin() -> Self {
        Self {
            repositories: seed::repositories(),
            metadata_standards: seed::metadata_standards(),
        }
    }
}

/// Catalog source answering queries from records held in memory
#[derive(Debug, Clone)]
pub struct InMemoryCatalog<R> {
    records: Vec<R>,
    page_size: usize,
}

impl<R: CatalogRecord> InMemoryCatalog<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl<R: CatalogRecord> CatalogSource<R> for InMemoryCatalog<R> {
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<CatalogPage<R>> {
        let page_size = if query.page_size == 0 {
            self.page_size
        } else {
            query.page_size
        };
        let page = query.page.max(1);
        let term = query.search_term.as_deref().unwrap_or("");

        let matching: Vec<&R> = self
            .records
            .iter()
            .filter(|r| r.matches_filters(&query.filters))
            .filter(|r| r.matches_search(term))
            .collect();

        let items = matching
            .iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .map(|r| (*r).clone())
            .collect();

        Ok(CatalogPage {
            items,
            total_count: matching.len(),
            page,
            page_size,
        })
    }

    async fn create_custom_entry(&self, input: &CustomEntryInput) -> Result<R> {
        Ok(R::from_custom(RecordId::new_custom(), input))
    }
}
