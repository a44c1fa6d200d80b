//! Store messages - communication between the handle, the store actor and
//! its request tasks

use std::fmt;

use tokio::sync::oneshot;

use crate::models::{City, CityId, CityInfo};
use crate::network::client::ApiError;
use crate::store::StoreState;

/// One of the four store operations, with its input
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    LoadAll,
    LoadOne(CityId),
    Create(CityInfo),
    Remove(CityId),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::LoadAll => "load_all",
            Operation::LoadOne(_) => "load_one",
            Operation::Create(_) => "create",
            Operation::Remove(_) => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::LoadAll => write!(f, "GET /cities"),
            Operation::LoadOne(id) => write!(f, "GET /cities/{}", id),
            Operation::Create(_) => write!(f, "POST /cities"),
            Operation::Remove(id) => write!(f, "DELETE /cities/{}", id),
        }
    }
}

/// Commands sent from a `CityStore` handle to the store actor
#[derive(Debug)]
pub enum StoreCommand {
    /// Issue the request for `op`. `reply` receives the state right after
    /// the completing transition.
    Execute {
        op: Operation,
        reply: Option<oneshot::Sender<StoreState>>,
    },
    /// Stop the actor
    Shutdown,
}

/// Outcome of one backend call, as reported by its request task
#[derive(Debug)]
pub enum NetworkResult {
    Cities(Result<Vec<City>, ApiError>),
    City(Result<City, ApiError>),
    Created(Result<City, ApiError>),
    Deleted {
        id: CityId,
        result: Result<(), ApiError>,
    },
}

/// Sent from a request task back to the actor when its call returns
#[derive(Debug)]
pub struct Completion {
    pub request_id: u64,
    pub result: NetworkResult,
}
