//! Line-driven interactive session over stdin.

use brewdb_catalog::LoadState;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;
use crate::Browser;

const HELP: &str = "\
commands:
  n          next page
  p          previous page
  r          reload the current page
  /<text>    search; `/` alone closes search
  d <id>     show details
  h          help
  q          quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Next,
    Prev,
    Reload,
    Search(String),
    CloseSearch,
    Details(String),
    Help,
    Quit,
    Unknown(String),
}

pub(crate) fn parse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(text) = line.strip_prefix('/') {
        return Some(if text.is_empty() {
            BrowseCommand::CloseSearch
        } else {
            BrowseCommand::Search(text.to_string())
        });
    }

    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));
    let command = match (head, rest) {
        ("n", "") => BrowseCommand::Next,
        ("p", "") => BrowseCommand::Prev,
        ("r", "") => BrowseCommand::Reload,
        ("h" | "?", "") => BrowseCommand::Help,
        ("q", "") => BrowseCommand::Quit,
        ("d", id) if !id.is_empty() => BrowseCommand::Details(id.to_string()),
        _ => BrowseCommand::Unknown(line.to_string()),
    };
    Some(command)
}

fn render_list(browser: &Browser) {
    match browser.load_state() {
        LoadState::Success(items) => {
            println!("page {}", browser.current_page());
            output::print_table(&items);
        }
        LoadState::Error(message) => {
            println!("error: {message}");
            println!("type `r` to retry");
        }
        LoadState::Idle | LoadState::Loading => println!("loading..."),
    }
}

/// Runs the session until `q` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or a spawned task panics.
pub(crate) async fn run_browse(browser: &mut Browser) -> anyhow::Result<()> {
    if let Some(handle) = browser.load_if_idle() {
        handle.await?;
    }
    render_list(browser);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        match command {
            BrowseCommand::Next => {
                browser.next_page().await?;
                render_list(browser);
            }
            BrowseCommand::Prev => match browser.prev_page() {
                Some(handle) => {
                    handle.await?;
                    render_list(browser);
                }
                None => println!("already on the first page"),
            },
            BrowseCommand::Reload => {
                browser.load_list().await?;
                render_list(browser);
            }
            BrowseCommand::Search(text) => {
                if let Some(handle) = browser.on_query_change(&text) {
                    handle.await?;
                }
                output::print_suggestions(&browser.search().suggestions);
            }
            BrowseCommand::CloseSearch => {
                browser.set_search_active(false);
                println!("search closed");
            }
            BrowseCommand::Details(id) => {
                if let Some(handle) = browser.load_details_by_id(&id) {
                    handle.await?;
                }
                match browser.selected_details(&id) {
                    Some(record) => output::print_details(&record),
                    None => println!("no details available for '{id}'"),
                }
            }
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(input) => {
                println!("unknown command '{input}'; type `h` for help");
            }
        }
    }

    tracing::debug!("browse session ended");
    Ok(())
}
