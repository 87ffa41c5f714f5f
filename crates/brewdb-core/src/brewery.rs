//! Normalized brewery record and the display helpers built on top of it.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A brewery as seen by the rest of the application.
///
/// Every field is always present. Values the upstream API omitted or sent as
/// `null` are stored as empty strings, and coordinates are kept as text so a
/// record can round-trip through any presentation layer without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreweryRecord {
    pub id: String,
    pub name: String,
    pub brewery_type: String,
    pub address_one: String,
    pub address_two: String,
    pub address_three: String,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    pub country: String,
    pub longitude: String,
    pub latitude: String,
    pub phone: String,
    pub website_url: String,
    pub state: String,
    pub street: String,
}

impl BreweryRecord {
    /// Single-line postal address assembled from the non-blank parts.
    ///
    /// Uses the first non-blank of `street`, `address_one`, `address_two` and
    /// `address_three` as the street line, then city, region, postal code and
    /// country. `state_province` wins over `state` when both are set.
    #[must_use]
    pub fn display_address(&self) -> String {
        let street = [
            &self.street,
            &self.address_one,
            &self.address_two,
            &self.address_three,
        ]
        .into_iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty());

        let region = non_blank(&self.state_province).or_else(|| non_blank(&self.state));

        [
            street,
            non_blank(&self.city),
            region,
            non_blank(&self.postal_code),
            non_blank(&self.country),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Parsed `(latitude, longitude)` pair, or `None` unless both parse.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = parse_coordinate(&self.latitude)?;
        let lon = parse_coordinate(&self.longitude)?;
        Some((lat, lon))
    }

    /// Web maps search link for this brewery.
    ///
    /// Searches by coordinates when they are available and by the display
    /// address otherwise. Returns `None` when the record has neither.
    #[must_use]
    pub fn maps_search_url(&self) -> Option<String> {
        if let Some((lat, lon)) = self.coordinates() {
            return Some(format!("{MAPS_SEARCH_URL}{lat},{lon}"));
        }
        let address = self.display_address();
        if address.is_empty() {
            return None;
        }
        Some(format!(
            "{MAPS_SEARCH_URL}{}",
            utf8_percent_encode(&address, NON_ALPHANUMERIC)
        ))
    }

    /// Website URL with a scheme, suitable for opening in a browser.
    ///
    /// Bare hostnames such as `www.example.com` get an `http://` prefix.
    #[must_use]
    pub fn website_link(&self) -> Option<String> {
        let trimmed = non_blank(&self.website_url)?;
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(trimmed.to_string())
        } else {
            Some(format!("http://{trimmed}"))
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "brewery_test.rs"]
mod tests;
