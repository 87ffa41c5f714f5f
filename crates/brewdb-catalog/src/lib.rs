//! Catalog browsing on top of a [`brewdb_core::BreweryTransport`].
//!
//! [`CatalogRepository`] validates requests and normalizes wire records;
//! [`CatalogBrowser`] owns the observable list, search, and details state.

pub mod adapter;
pub mod browser;
pub mod repository;

#[cfg(test)]
mod test_support;

pub use adapter::normalize;
pub use browser::{
    BrowserConfig, CatalogBrowser, LoadState, SearchState, DEFAULT_PER_PAGE,
    DEFAULT_SEARCH_DEBOUNCE, SUGGESTION_LIMIT,
};
pub use repository::{clamp_page, clamp_per_page, CatalogRepository};
