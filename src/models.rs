use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// City identifier as assigned by the backend
///
/// json-server hands out numeric ids for seeded data and string ids for
/// records it creates, so both shapes are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityId::Number(n) => write!(f, "{}", n),
            CityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for CityId {
    fn from(id: u64) -> Self {
        CityId::Number(id)
    }
}

impl From<&str> for CityId {
    fn from(id: &str) -> Self {
        CityId::Text(id.to_string())
    }
}

impl From<String> for CityId {
    fn from(id: String) -> Self {
        CityId::Text(id)
    }
}

/// Map coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// Everything about a city except its identifier
///
/// The backend owns the record's shape, so fields are kept exactly as they
/// arrived and written back unchanged. The accessors below read the
/// well-known ones and return `None` when a field is missing or has a shape
/// they cannot make sense of.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl CityInfo {
    pub fn new(city_name: impl Into<String>) -> Self {
        CityInfo::default().with_field("cityName", city_name.into())
    }

    /// Set any field, replacing a previous value
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_country(self, country: impl Into<String>) -> Self {
        self.with_field("country", country.into())
    }

    pub fn with_position(self, lat: f64, lng: f64) -> Self {
        self.with_field("position", json!({ "lat": lat, "lng": lng }))
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        self.with_field("notes", notes.into())
    }

    pub fn with_date(self, date: DateTime<Utc>) -> Self {
        self.with_field("date", date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn city_name(&self) -> Option<&str> {
        self.text("cityName")
    }

    pub fn country(&self) -> Option<&str> {
        self.text("country")
    }

    pub fn emoji(&self) -> Option<&str> {
        self.text("emoji")
    }

    pub fn notes(&self) -> Option<&str> {
        self.text("notes")
    }

    /// Visit date, from an RFC 3339 timestamp or a plain `YYYY-MM-DD` day
    pub fn date(&self) -> Option<DateTime<Utc>> {
        let raw = self.text("date")?;
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }

    /// Coordinates; numbers and numeric strings are both accepted
    pub fn position(&self) -> Option<Position> {
        let position = self.get("position")?;
        Some(Position {
            lat: coordinate(position.get("lat")?)?,
            lng: coordinate(position.get("lng")?)?,
        })
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A visited city as stored on the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(flatten)]
    pub info: CityInfo,
}

impl City {
    /// Display name, falling back to the identifier
    pub fn display_name(&self) -> String {
        match self.info.city_name() {
            Some(name) => name.to_string(),
            None => format!("#{}", self.id),
        }
    }
}
