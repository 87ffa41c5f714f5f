//! Plain-text rendering of catalog records.

use brewdb_core::BreweryRecord;

const NAME_WIDTH: usize = 36;

/// Placeholder for blank fields in tables.
const BLANK: &str = "\u{2014}";

fn or_blank(value: &str) -> &str {
    if value.trim().is_empty() {
        BLANK
    } else {
        value
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_string()
    }
}

/// City and region of a brewery, e.g. `"Norman, Oklahoma"`.
pub(crate) fn location(record: &BreweryRecord) -> String {
    let region = if record.state_province.trim().is_empty() {
        record.state.trim()
    } else {
        record.state_province.trim()
    };
    [record.city.trim(), region]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn table_header() -> String {
    format!(
        "{:<38}{:<width$}{:<12}LOCATION",
        "ID",
        "NAME",
        "TYPE",
        width = NAME_WIDTH + 2
    )
}

pub(crate) fn table_row(record: &BreweryRecord) -> String {
    format!(
        "{:<38}{:<width$}{:<12}{}",
        or_blank(&record.id),
        truncate(or_blank(&record.name), NAME_WIDTH),
        or_blank(&record.brewery_type),
        or_blank(&location(record)),
        width = NAME_WIDTH + 2
    )
}

pub(crate) fn print_table(records: &[BreweryRecord]) {
    if records.is_empty() {
        println!("no breweries on this page");
        return;
    }
    println!("{}", table_header());
    for record in records {
        println!("{}", table_row(record));
    }
}

pub(crate) fn print_suggestions(records: &[BreweryRecord]) {
    if records.is_empty() {
        println!("no suggestions");
        return;
    }
    for record in records {
        println!("{:<38}{}", or_blank(&record.id), or_blank(&record.name));
    }
}

/// Detail lines for one brewery. Blank fields are left out.
pub(crate) fn detail_lines(record: &BreweryRecord) -> Vec<String> {
    let mut lines = vec![or_blank(&record.name).to_string()];
    let mut field = |label: &str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            lines.push(format!("  {label:<9}{value}"));
        }
    };
    field("id", Some(record.id.clone()));
    field("type", Some(record.brewery_type.clone()));
    field("address", Some(record.display_address()));
    field("phone", Some(record.phone.clone()));
    field("website", record.website_link());
    field("map", record.maps_search_url());
    lines
}

pub(crate) fn print_details(record: &BreweryRecord) {
    for line in detail_lines(record) {
        println!("{line}");
    }
}
