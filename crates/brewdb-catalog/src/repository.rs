//! Request validation and normalization in front of a [`BreweryTransport`].
//!
//! The repository holds no state of its own. It clamps paging parameters,
//! short-circuits blank queries and ids without touching the network, and
//! maps every raw result through [`normalize`].

use brewdb_core::{BreweryRecord, BreweryTransport, MAX_PER_PAGE};

use crate::adapter::normalize;

/// Effective page number: anything below 1 becomes 1.
#[must_use]
pub fn clamp_page(page: i64) -> u32 {
    u32::try_from(page.max(1)).unwrap_or(u32::MAX)
}

/// Effective page size, clamped into `1..=200`.
#[must_use]
pub fn clamp_per_page(per_page: i64) -> u32 {
    u32::try_from(per_page.clamp(1, i64::from(MAX_PER_PAGE))).unwrap_or(MAX_PER_PAGE)
}

/// Catalog access built on a transport.
pub struct CatalogRepository<T> {
    transport: T,
}

impl<T> CatalogRepository<T>
where
    T: BreweryTransport,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Loads one page of the catalog.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged; nothing is retried here.
    pub async fn list_page(
        &self,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<BreweryRecord>, T::Error> {
        let page = clamp_page(page);
        let per_page = clamp_per_page(per_page);
        let raw = self.transport.fetch_page(page, per_page).await?;
        tracing::debug!(page, per_page, count = raw.len(), "fetched catalog page");
        Ok(raw.into_iter().map(normalize).collect())
    }

    /// Search-as-you-type lookup. Blank queries return an empty list
    /// without a network call. The result count is left as the server sent it.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged.
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<BreweryRecord>, T::Error> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let raw = self.transport.fetch_autocomplete(query).await?;
        tracing::debug!(query, count = raw.len(), "fetched suggestions");
        Ok(raw.into_iter().map(normalize).collect())
    }

    /// Single-brewery lookup.
    ///
    /// Returns `None` for a blank id (no network call) and for any transport
    /// failure, including "not found".
    pub async fn get_by_id(&self, id: &str) -> Option<BreweryRecord> {
        if id.trim().is_empty() {
            return None;
        }
        match self.transport.fetch_by_id(id).await {
            Ok(raw) => Some(normalize(raw)),
            Err(err) => {
                tracing::warn!(id, error = %err, "brewery lookup failed, treating as not found");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
