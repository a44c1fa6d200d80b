//! Store layer - the city state machine
//!
//! A `CityStore` handle sends commands to the `StoreActor`, which owns the
//! state, runs backend calls as tasks and applies each response through the
//! pure `CityReducer`. Subscribers watch the resulting `StoreState`.

pub mod actor;
pub mod handle;
pub mod reducer;
pub mod state;

pub use actor::StoreActor;
pub use handle::{CityStore, Pending, StoreError};
pub use reducer::{Action, CityReducer, Reducer};
pub use state::{Phase, StoreState};
