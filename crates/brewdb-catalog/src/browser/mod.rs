//! The fetch orchestrator behind the catalog UI.
//!
//! [`CatalogBrowser`] owns every piece of client-visible state (current page,
//! list status, search, resolved details) and is the only writer to it. Each
//! container is a `tokio::sync::watch` channel, so a presentation layer can
//! subscribe to changes or take snapshots.
//!
//! Commands return immediately after their synchronous bookkeeping. Network
//! work runs on spawned tasks whose [`JoinHandle`]s are handed back for
//! callers that want to await resolution; dropping a handle does not cancel
//! the work.
//!
//! Suggestion fetches are debounced and strictly superseding: each new query
//! cancels the previous debounce/fetch task before a new one is scheduled, and
//! a cancelled task never writes its result. List loads are not sequenced
//! against each other; whichever resolves last is what `LoadState` shows.

mod state;

use std::sync::Arc;

use brewdb_core::{BreweryRecord, BreweryTransport};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::repository::{clamp_page, CatalogRepository};

pub use state::{
    BrowserConfig, LoadState, SearchState, DEFAULT_PER_PAGE, DEFAULT_SEARCH_DEBOUNCE,
    SUGGESTION_LIMIT,
};

/// Paginated catalog browsing with debounced search and detail lookup.
pub struct CatalogBrowser<T> {
    repository: Arc<CatalogRepository<T>>,
    config: BrowserConfig,
    load_state: Arc<watch::Sender<LoadState>>,
    current_page: watch::Sender<u32>,
    search: Arc<watch::Sender<SearchState>>,
    details: Arc<watch::Sender<Option<BreweryRecord>>>,
    /// Parent of every token handed to spawned work; cancelled on drop.
    scope: CancellationToken,
    /// Debounce/fetch task for the latest query.
    pending_search: Option<CancellationToken>,
    /// By-id fetch for the latest details request.
    pending_details: Option<CancellationToken>,
}

impl<T> CatalogBrowser<T>
where
    T: BreweryTransport + 'static,
{
    pub fn new(repository: CatalogRepository<T>, config: BrowserConfig) -> Self {
        let (load_state, _) = watch::channel(LoadState::Idle);
        let (current_page, _) = watch::channel(1);
        let (search, _) = watch::channel(SearchState::default());
        let (details, _) = watch::channel(None);
        Self {
            repository: Arc::new(repository),
            config,
            load_state: Arc::new(load_state),
            current_page,
            search: Arc::new(search),
            details: Arc::new(details),
            scope: CancellationToken::new(),
            pending_search: None,
            pending_details: None,
        }
    }

    // --- snapshots -------------------------------------------------------

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state.borrow().clone()
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        *self.current_page.borrow()
    }

    #[must_use]
    pub fn search(&self) -> SearchState {
        self.search.borrow().clone()
    }

    /// Most recently resolved out-of-list brewery.
    #[must_use]
    pub fn details(&self) -> Option<BreweryRecord> {
        self.details.borrow().clone()
    }

    // --- subscriptions ---------------------------------------------------

    pub fn subscribe_load_state(&self) -> watch::Receiver<LoadState> {
        self.load_state.subscribe()
    }

    pub fn subscribe_current_page(&self) -> watch::Receiver<u32> {
        self.current_page.subscribe()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search.subscribe()
    }

    pub fn subscribe_details(&self) -> watch::Receiver<Option<BreweryRecord>> {
        self.details.subscribe()
    }

    // --- list ------------------------------------------------------------

    /// Reloads the current page with the default page size. Also the retry
    /// path after an `Error`.
    pub fn load_list(&self) -> JoinHandle<()> {
        self.load_page(
            i64::from(self.current_page()),
            i64::from(self.config.per_page),
        )
    }

    /// Loads `page` (clamped to at least 1).
    ///
    /// `LoadState` becomes `Loading` and the current page is updated before
    /// this returns, ahead of the fetch itself.
    pub fn load_page(&self, page: i64, per_page: i64) -> JoinHandle<()> {
        let page = clamp_page(page);
        self.load_state.send_replace(LoadState::Loading);
        self.current_page.send_replace(page);
        tracing::debug!(page, per_page, "loading catalog page");

        let repository = Arc::clone(&self.repository);
        let load_state = Arc::clone(&self.load_state);
        let token = self.scope.child_token();
        tokio::spawn(async move {
            let result = tokio::select! {
                () = token.cancelled() => return,
                result = repository.list_page(i64::from(page), per_page) => result,
            };
            let next = match result {
                Ok(items) => {
                    tracing::debug!(page, count = items.len(), "catalog page loaded");
                    LoadState::Success(items)
                }
                Err(err) => {
                    tracing::warn!(page, error = %err, "catalog page load failed");
                    LoadState::Error(failure_message(&err))
                }
            };
            publish(&load_state, &token, next);
        })
    }

    pub fn next_page(&self) -> JoinHandle<()> {
        self.load_page(
            i64::from(self.current_page()) + 1,
            i64::from(self.config.per_page),
        )
    }

    /// Loads the previous page; does nothing on page 1.
    pub fn prev_page(&self) -> Option<JoinHandle<()>> {
        let current = self.current_page();
        (current > 1).then(|| {
            self.load_page(
                i64::from(current) - 1,
                i64::from(self.config.per_page),
            )
        })
    }

    /// Starts the first load. No-op once anything has been loaded.
    pub fn load_if_idle(&self) -> Option<JoinHandle<()>> {
        let idle = matches!(*self.load_state.borrow(), LoadState::Idle);
        idle.then(|| self.load_list())
    }

    // --- search ----------------------------------------------------------

    /// Opens or closes search. Closing cancels any pending suggestion fetch
    /// and clears the query and suggestions.
    pub fn set_search_active(&mut self, active: bool) {
        if active {
            self.search.send_if_modified(|state| {
                let changed = !state.active;
                state.active = true;
                changed
            });
            return;
        }

        self.cancel_pending_search();
        self.search.send_modify(|state| {
            state.active = false;
            state.query.clear();
            state.suggestions.clear();
        });
    }

    /// Records new query text and reschedules the suggestion fetch.
    ///
    /// The previous debounce/fetch task is cancelled first. Blank text clears
    /// the suggestions and schedules nothing. Otherwise suggestions are
    /// fetched once the debounce period passes without another call. Typing
    /// implies an active search, so this also sets `active`.
    pub fn on_query_change(&mut self, text: &str) -> Option<JoinHandle<()>> {
        self.cancel_pending_search();

        let query = text.to_owned();
        let blank = query.trim().is_empty();
        self.search.send_modify(|state| {
            state.active = true;
            state.query.clone_from(&query);
            if blank {
                state.suggestions.clear();
            }
        });
        if blank {
            return None;
        }

        let token = self.scope.child_token();
        self.pending_search = Some(token.clone());

        let repository = Arc::clone(&self.repository);
        let search = Arc::clone(&self.search);
        let debounce = self.config.debounce;
        let limit = self.config.suggestion_limit;
        Some(tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => return,
                () = tokio::time::sleep(debounce) => {}
            }

            let result = tokio::select! {
                () = token.cancelled() => return,
                result = repository.autocomplete(&query) => result,
            };
            let suggestions = match result {
                Ok(mut items) => {
                    items.truncate(limit);
                    items
                }
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "suggestion fetch failed");
                    Vec::new()
                }
            };

            tracing::debug!(query = %query, count = suggestions.len(), "suggestions resolved");
            search.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                state.suggestions = suggestions;
                true
            });
        }))
    }

    /// Empties the suggestion list, leaving the query and any pending fetch alone.
    pub fn clear_suggestions(&self) {
        self.search.send_if_modified(|state| {
            let changed = !state.suggestions.is_empty();
            state.suggestions.clear();
            changed
        });
    }

    fn cancel_pending_search(&mut self) {
        if let Some(token) = self.pending_search.take() {
            token.cancel();
        }
    }

    // --- details ---------------------------------------------------------

    /// Resolves the brewery `id` for detail display.
    ///
    /// Any earlier by-id fetch is cancelled first, so only the latest request
    /// can set the resolved details. A match in the current `Success` list is
    /// used immediately and `None` is returned. Otherwise the brewery is
    /// fetched and the resolved details become whatever the lookup returns,
    /// possibly nothing. Blank ids are ignored.
    pub fn load_details_by_id(&mut self, id: &str) -> Option<JoinHandle<()>> {
        if id.trim().is_empty() {
            return None;
        }
        self.cancel_pending_details();

        let existing = self.load_state.borrow().find(id).cloned();
        if let Some(record) = existing {
            self.details.send_replace(Some(record));
            return None;
        }

        tracing::debug!(id, "brewery not in current page, fetching");
        let token = self.scope.child_token();
        self.pending_details = Some(token.clone());

        let id = id.to_owned();
        let repository = Arc::clone(&self.repository);
        let details = Arc::clone(&self.details);
        Some(tokio::spawn(async move {
            let resolved = tokio::select! {
                () = token.cancelled() => return,
                resolved = repository.get_by_id(&id) => resolved,
            };
            publish(&details, &token, resolved);
        }))
    }

    fn cancel_pending_details(&mut self) {
        if let Some(token) = self.pending_details.take() {
            token.cancel();
        }
    }

    /// Brewery to show for `id`: the current list first, then the resolved
    /// details if they belong to the same id.
    #[must_use]
    pub fn selected_details(&self, id: &str) -> Option<BreweryRecord> {
        let from_list = self.load_state.borrow().find(id).cloned();
        from_list.or_else(|| {
            self.details
                .borrow()
                .as_ref()
                .filter(|record| record.id == id)
                .cloned()
        })
    }
}

impl<T> Drop for CatalogBrowser<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// Replaces the channel value unless `token` was cancelled. The check runs
/// under the channel's write lock.
fn publish<S>(tx: &watch::Sender<S>, token: &CancellationToken, value: S) {
    tx.send_if_modified(|current| {
        if token.is_cancelled() {
            return false;
        }
        *current = value;
        true
    });
}

fn failure_message(err: &impl std::fmt::Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        "Unknown error".to_owned()
    } else {
        message
    }
}
