//! Wire shape of a brewery as returned by the Open Brewery DB API.
//!
//! Field names follow the upstream JSON exactly. Every field is nullable and
//! may be missing entirely; normalization into [`crate::BreweryRecord`]
//! happens in the catalog adapter.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// A brewery exactly as the API sent it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawBrewery {
    pub id: Option<String>,
    pub name: Option<String>,
    pub brewery_type: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub longitude: Option<Coordinate>,
    pub latitude: Option<Coordinate>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
}

/// A latitude or longitude value.
///
/// The API has historically sent coordinates both as JSON numbers and as
/// numeric strings. Any other JSON type is accepted and treated as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Coordinate {
    /// Decimal text form of the coordinate, or `None` for unusable values.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Coordinate::Number(value) => Some(value.to_string()),
            Coordinate::Text(text) => Some(text.clone()),
            Coordinate::Other(_) => None,
        }
    }
}
