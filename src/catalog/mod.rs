//! Catalog source adapters for the repository and metadata-standard selectors

mod memory;
mod seed;
mod traits;

pub use memory::{CatalogData, InMemoryCatalog, DEFAULT_PAGE_SIZE};
pub use traits::{CatalogFilters, CatalogPage, CatalogQuery, CatalogSource};
