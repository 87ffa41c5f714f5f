//! Observable state owned by [`super::CatalogBrowser`].

use std::time::Duration;

use brewdb_core::{AppConfig, BreweryRecord, MAX_PER_PAGE};

/// Default page size for list loads.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Quiet period after the last keystroke before suggestions are fetched.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Most suggestions kept from a single autocomplete response.
pub const SUGGESTION_LIMIT: usize = 15;

/// Status of the main paginated list.
///
/// `Idle` only exists before the first load. Every later load passes through
/// `Loading` and ends in `Success` or `Error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success(Vec<BreweryRecord>),
    Error(String),
}

impl LoadState {
    /// Items of a `Success` state.
    #[must_use]
    pub fn items(&self) -> Option<&[BreweryRecord]> {
        match self {
            LoadState::Success(items) => Some(items),
            LoadState::Idle | LoadState::Loading | LoadState::Error(_) => None,
        }
    }

    /// Finds a loaded item by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&BreweryRecord> {
        self.items()?.iter().find(|item| item.id == id)
    }
}

/// Search-as-you-type state.
///
/// While `active` is false both `query` and `suggestions` are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub suggestions: Vec<BreweryRecord>,
}

/// Tunables for [`super::CatalogBrowser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserConfig {
    pub per_page: u32,
    pub debounce: Duration,
    pub suggestion_limit: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            suggestion_limit: SUGGESTION_LIMIT,
        }
    }
}

impl BrowserConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
            debounce: Duration::from_millis(config.search_debounce_ms),
            suggestion_limit: SUGGESTION_LIMIT,
        }
    }
}
