//! Reducer - pure function: (state, action) -> state
//!
//! The store actor is the only caller. Every action bumps `revision`.

use crate::models::{City, CityId};
use crate::store::state::StoreState;

/// Transforms state based on actions.
///
/// Implementations must be pure: no I/O, no clocks, no shared state.
pub trait Reducer {
    type State;
    type Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}

/// State transitions of the city store
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A request was issued
    Loading,
    /// `GET /cities` returned
    CitiesLoaded(Vec<City>),
    /// `GET /cities/{id}` returned
    CityLoaded(City),
    /// `POST /cities` returned the stored record
    CityCreated(City),
    /// `DELETE /cities/{id}` succeeded
    CityDeleted(CityId),
    /// A request failed; carries the user-facing message
    Rejected(String),
}

pub struct CityReducer;

impl Reducer for CityReducer {
    type State = StoreState;
    type Action = Action;

    fn reduce(mut state: StoreState, action: Action) -> StoreState {
        state.revision += 1;

        match action {
            Action::Loading => {
                state.is_loading = true;
                state.error = None;
            }
            Action::CitiesLoaded(cities) => {
                state.is_loading = false;
                state.error = None;
                state.cities = cities;
            }
            Action::CityLoaded(city) => {
                state.is_loading = false;
                state.error = None;
                state.current_city = Some(city);
            }
            Action::CityCreated(city) => {
                state.is_loading = false;
                state.error = None;
                state.cities.push(city);
            }
            Action::CityDeleted(id) => {
                state.is_loading = false;
                state.error = None;
                state.cities.retain(|city| city.id != id);
            }
            Action::Rejected(message) => {
                state.is_loading = false;
                state.error = Some(message);
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CityInfo;
    use crate::store::state::Phase;

    fn city(id: u64, name: &str) -> City {
        City {
            id: CityId::Number(id),
            info: CityInfo::new(name),
        }
    }

    fn loaded(cities: Vec<City>) -> StoreState {
        let state = CityReducer::reduce(StoreState::new(), Action::Loading);
        CityReducer::reduce(state, Action::CitiesLoaded(cities))
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = StoreState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.cities.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.current_city, None);
        assert_eq!(state.error_message(), "");
    }

    #[test]
    fn test_loading_sets_flag_and_clears_error() {
        let state = StoreState {
            error: Some("old".into()),
            ..Default::default()
        };

        let state = CityReducer::reduce(state, Action::Loading);

        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.revision, 1);
    }

    #[test]
    fn test_cities_loaded_replaces_list() {
        let state = loaded(vec![city(1, "Lisbon")]);
        let state = CityReducer::reduce(state, Action::Loading);
        let state = CityReducer::reduce(state, Action::CitiesLoaded(vec![city(2, "Madrid")]));

        assert_eq!(state.cities, vec![city(2, "Madrid")]);
        assert!(!state.is_loading);
        assert_eq!(state.phase(), Phase::Loaded);
    }

    #[test]
    fn test_rejected_keeps_data() {
        let mut state = loaded(vec![city(1, "Lisbon")]);
        state.current_city = Some(city(1, "Lisbon"));

        let state = CityReducer::reduce(state, Action::Loading);
        let state = CityReducer::reduce(state, Action::Rejected("boom".into()));

        assert_eq!(state.cities, vec![city(1, "Lisbon")]);
        assert_eq!(state.current_city, Some(city(1, "Lisbon")));
        assert!(!state.is_loading);
        assert_eq!(state.error_message(), "boom");
        assert_eq!(state.phase(), Phase::Errored);
    }

    #[test]
    fn test_city_loaded_sets_current_only() {
        let state = loaded(vec![city(1, "Lisbon")]);
        let state = CityReducer::reduce(state, Action::CityLoaded(city(3, "Berlin")));

        assert_eq!(state.current_city, Some(city(3, "Berlin")));
        assert_eq!(state.cities, vec![city(1, "Lisbon")]);
    }

    #[test]
    fn test_city_created_appends() {
        let state = loaded(vec![city(1, "Lisbon")]);
        let state = CityReducer::reduce(state, Action::CityCreated(city(99, "Paris")));

        assert_eq!(state.cities, vec![city(1, "Lisbon"), city(99, "Paris")]);
    }

    #[test]
    fn test_city_deleted_keeps_order_of_others() {
        let state = loaded(vec![city(4, "A"), city(5, "B"), city(6, "C")]);
        let state = CityReducer::reduce(state, Action::CityDeleted(CityId::Number(5)));

        assert_eq!(state.cities, vec![city(4, "A"), city(6, "C")]);
    }

    #[test]
    fn test_city_deleted_unknown_id_is_noop_on_list() {
        let before = vec![city(4, "A"), city(6, "C")];
        let state = loaded(before.clone());
        let state = CityReducer::reduce(state, Action::CityDeleted(CityId::Number(5)));

        assert_eq!(state.cities, before);
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let state = CityReducer::reduce(StoreState::new(), Action::Rejected("boom".into()));
        assert_eq!(state.phase(), Phase::Errored);

        let state = CityReducer::reduce(state, Action::CitiesLoaded(vec![]));
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), Phase::Loaded);
    }

    #[test]
    fn test_every_action_bumps_revision() {
        let state = loaded(vec![]);
        assert_eq!(state.revision, 2);
        let state = CityReducer::reduce(state, Action::Rejected("x".into()));
        assert_eq!(state.revision, 3);
    }
}
