//! Store state - pure data structure with no I/O logic

use crate::models::{City, CityId};

/// Where the store is in its request lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has happened yet
    Idle,
    /// A request is outstanding
    Loading,
    /// The last request succeeded
    Loaded,
    /// The last request failed
    Errored,
}

/// Everything a subscriber can observe
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreState {
    /// Arrival order from the backend, local appends at the end
    pub cities: Vec<City>,
    pub is_loading: bool,
    pub current_city: Option<City>,
    /// User-facing message of the last failure
    pub error: Option<String>,
    /// Number of transitions applied so far
    pub revision: u64,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Errored
        } else if self.revision == 0 {
            Phase::Idle
        } else {
            Phase::Loaded
        }
    }

    /// The error message, or `""` when there is none
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }

    pub fn city(&self, id: &CityId) -> Option<&City> {
        self.cities.iter().find(|c| &c.id == id)
    }

    /// True once at least one request has completed and none is running
    pub fn is_settled(&self) -> bool {
        self.revision > 0 && !self.is_loading
    }
}
