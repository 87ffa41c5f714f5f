//! The narrow fetch interface the catalog depends on.
//!
//! Anything that can produce [`RawBrewery`] values (the HTTP client in
//! `brewdb-client`, an in-memory fake in tests) implements
//! [`BreweryTransport`]. Timeouts and transport-level retries are the
//! implementation's concern; callers only see success or `Self::Error`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::raw::RawBrewery;

/// Source of raw brewery records.
#[async_trait]
pub trait BreweryTransport: Send + Sync {
    /// Failure reported for network, HTTP, or decoding problems.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches one page of the catalog. Both arguments are already clamped.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<RawBrewery>, Self::Error>;

    /// Fetches search-as-you-type matches for a non-blank query.
    async fn fetch_autocomplete(&self, query: &str) -> Result<Vec<RawBrewery>, Self::Error>;

    /// Fetches a single brewery. A missing entity is reported as an error.
    async fn fetch_by_id(&self, id: &str) -> Result<RawBrewery, Self::Error>;
}

#[async_trait]
impl<T> BreweryTransport for Arc<T>
where
    T: BreweryTransport + ?Sized,
{
    type Error = T::Error;

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<RawBrewery>, Self::Error> {
        (**self).fetch_page(page, per_page).await
    }

    async fn fetch_autocomplete(&self, query: &str) -> Result<Vec<RawBrewery>, Self::Error> {
        (**self).fetch_autocomplete(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RawBrewery, Self::Error> {
        (**self).fetch_by_id(id).await
    }
}
