use super::*;

fn norman() -> BreweryRecord {
    BreweryRecord {
        id: "5128df48-79fc-4f0f-8b52-d06be54d0cec".to_string(),
        name: "(405) Brewing Co".to_string(),
        brewery_type: "micro".to_string(),
        address_one: "1716 Topeka St".to_string(),
        city: "Norman".to_string(),
        state_province: "Oklahoma".to_string(),
        postal_code: "73069-8224".to_string(),
        country: "United States".to_string(),
        longitude: "-97.46818222".to_string(),
        latitude: "35.25738891".to_string(),
        phone: "4058160490".to_string(),
        website_url: "http://www.405brewing.com".to_string(),
        state: "Oklahoma".to_string(),
        street: "1716 Topeka St".to_string(),
        ..BreweryRecord::default()
    }
}

#[test]
fn display_address_joins_non_blank_parts() {
    assert_eq!(
        norman().display_address(),
        "1716 Topeka St, Norman, Oklahoma, 73069-8224, United States"
    );
}

#[test]
fn display_address_falls_back_through_street_lines() {
    let record = BreweryRecord {
        address_two: "Unit 4".to_string(),
        city: "Bend".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(record.display_address(), "Unit 4, Bend");
}

#[test]
fn display_address_uses_state_when_province_blank() {
    let record = BreweryRecord {
        city: "Austin".to_string(),
        state_province: "  ".to_string(),
        state: "Texas".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(record.display_address(), "Austin, Texas");
}

#[test]
fn display_address_empty_record_is_empty() {
    assert_eq!(BreweryRecord::default().display_address(), "");
}

#[test]
fn coordinates_require_both_values() {
    assert_eq!(norman().coordinates(), Some((35.257_388_91, -97.468_182_22)));

    let missing_lon = BreweryRecord {
        latitude: "35.25".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(missing_lon.coordinates(), None);

    let garbage = BreweryRecord {
        latitude: "north".to_string(),
        longitude: "-97".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(garbage.coordinates(), None);
}

#[test]
fn maps_search_url_prefers_coordinates() {
    assert_eq!(
        norman().maps_search_url().as_deref(),
        Some("https://www.google.com/maps/search/?api=1&query=35.25738891,-97.46818222")
    );
}

#[test]
fn maps_search_url_encodes_address_without_coordinates() {
    let record = BreweryRecord {
        street: "1 Main St".to_string(),
        city: "Bend".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(
        record.maps_search_url().as_deref(),
        Some("https://www.google.com/maps/search/?api=1&query=1%20Main%20St%2C%20Bend")
    );
}

#[test]
fn maps_search_url_none_without_location() {
    assert_eq!(BreweryRecord::default().maps_search_url(), None);
}

#[test]
fn website_link_adds_missing_scheme() {
    let record = BreweryRecord {
        website_url: " www.example.com ".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(
        record.website_link().as_deref(),
        Some("http://www.example.com")
    );
}

#[test]
fn website_link_keeps_existing_scheme_case_insensitively() {
    let record = BreweryRecord {
        website_url: "HTTPS://Example.com".to_string(),
        ..BreweryRecord::default()
    };
    assert_eq!(record.website_link().as_deref(), Some("HTTPS://Example.com"));
}

#[test]
fn website_link_blank_is_none() {
    assert_eq!(BreweryRecord::default().website_link(), None);
}

#[test]
fn serializes_with_camel_case_keys() {
    let value = serde_json::to_value(norman()).expect("record should serialize");
    assert_eq!(value["breweryType"], "micro");
    assert_eq!(value["addressOne"], "1716 Topeka St");
    assert_eq!(value["websiteUrl"], "http://www.405brewing.com");
}
