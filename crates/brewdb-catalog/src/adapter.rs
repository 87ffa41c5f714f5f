//! Normalization of API wire records into [`BreweryRecord`]s.

use brewdb_core::{BreweryRecord, Coordinate, RawBrewery};

/// Converts a [`RawBrewery`] into a fully populated [`BreweryRecord`].
///
/// Absent and `null` fields become empty strings. Numeric coordinates are
/// rendered in decimal form; coordinates of any other JSON type become empty.
/// Never fails.
#[must_use]
pub fn normalize(raw: RawBrewery) -> BreweryRecord {
    BreweryRecord {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        brewery_type: raw.brewery_type.unwrap_or_default(),
        address_one: raw.address_1.unwrap_or_default(),
        address_two: raw.address_2.unwrap_or_default(),
        address_three: raw.address_3.unwrap_or_default(),
        city: raw.city.unwrap_or_default(),
        state_province: raw.state_province.unwrap_or_default(),
        postal_code: raw.postal_code.unwrap_or_default(),
        country: raw.country.unwrap_or_default(),
        longitude: coordinate_text(raw.longitude.as_ref()),
        latitude: coordinate_text(raw.latitude.as_ref()),
        phone: raw.phone.unwrap_or_default(),
        website_url: raw.website_url.unwrap_or_default(),
        state: raw.state.unwrap_or_default(),
        street: raw.street.unwrap_or_default(),
    }
}

fn coordinate_text(value: Option<&Coordinate>) -> String {
    value.and_then(Coordinate::to_text).unwrap_or_default()
}
