//! Network layer - HTTP calls against the cities backend

pub mod client;

pub use client::{ApiError, CitiesClient};
