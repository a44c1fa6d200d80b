//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::net::TcpListener;

use cities_store::{City, CityId, CityInfo};
use serde_json::{json, Value};

/// Base URL of a port nothing listens on.
pub fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Backend JSON for a city record.
pub fn city_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "cityName": name,
        "country": "Somewhere",
        "emoji": "🏳",
        "date": "2027-10-31T15:59:59.138Z",
        "notes": "",
        "position": { "lat": 38.72, "lng": -9.14 }
    })
}

/// The `City` the store should hold for `city_json(id, name)`.
pub fn city(id: u64, name: &str) -> City {
    serde_json::from_value(city_json(id, name)).expect("valid city json")
}

pub fn list_json(cities: &[(u64, &str)]) -> String {
    let list: Vec<Value> = cities.iter().map(|(id, name)| city_json(*id, name)).collect();
    Value::Array(list).to_string()
}

pub fn ids(cities: &[City]) -> Vec<CityId> {
    cities.iter().map(|c| c.id.clone()).collect()
}
