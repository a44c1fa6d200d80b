//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, the store
//! handle, the store actor and its request tasks.

pub mod store;
pub mod ui_events;

pub use store::{Completion, NetworkResult, Operation, StoreCommand};
pub use ui_events::UiEvent;
