//! # Cities Store
//!
//! Client-side state container for a REST "cities" backend.
//!
//! ## Features
//! - Load all cities, load one city, create, delete
//! - Loading / error / data state published to subscribers
//! - Pure reducer for every state transition
//! - YAML configuration with CLI overrides
//! - Terminal front-end (`cities` binary)
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous, watches the store state
//! - Store Layer (actor + reducer)
//! - Network Layer (Tokio tasks running reqwest calls)

pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use models::{City, CityId, CityInfo, Position};
pub use network::{ApiError, CitiesClient};
pub use store::{CityStore, Pending, Phase, StoreError, StoreState};
