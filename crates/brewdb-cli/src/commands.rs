//! One-shot command handlers.
//!
//! Each handler drives the browser the same way an interactive client would,
//! awaits the spawned work, then prints the resulting state.

use brewdb_catalog::LoadState;

use crate::output;
use crate::Browser;

/// Loads one page and prints it as a table.
///
/// # Errors
///
/// Returns an error if the page fails to load or the load task panics.
pub(crate) async fn run_list(browser: &Browser, page: i64, per_page: i64) -> anyhow::Result<()> {
    browser.load_page(page, per_page).await?;

    match browser.load_state() {
        LoadState::Success(items) => {
            println!("page {}", browser.current_page());
            output::print_table(&items);
            Ok(())
        }
        LoadState::Error(message) => anyhow::bail!(
            "failed to load page {}: {message}",
            browser.current_page()
        ),
        LoadState::Idle | LoadState::Loading => anyhow::bail!("page load did not complete"),
    }
}

/// Prints the suggestions for `query` once the debounce period has passed.
///
/// Suggestion failures are not errors; they show up as an empty list.
///
/// # Errors
///
/// Returns an error only if the search task panics.
pub(crate) async fn run_search(browser: &mut Browser, query: &str) -> anyhow::Result<()> {
    browser.set_search_active(true);
    let Some(handle) = browser.on_query_change(query) else {
        println!("query is blank; nothing to search");
        return Ok(());
    };
    handle.await?;

    output::print_suggestions(&browser.search().suggestions);
    Ok(())
}

/// Prints details for one brewery, or a notice when there are none.
///
/// # Errors
///
/// Returns an error only if the lookup task panics.
pub(crate) async fn run_show(browser: &mut Browser, id: &str) -> anyhow::Result<()> {
    if let Some(handle) = browser.load_details_by_id(id) {
        handle.await?;
    }

    match browser.selected_details(id) {
        Some(record) => output::print_details(&record),
        None => println!("no details available for '{}'", id.trim()),
    }
    Ok(())
}
