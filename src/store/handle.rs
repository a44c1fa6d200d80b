//! Public handle to a running city store

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};

use crate::config::{Config, ConfigError};
use crate::messages::{Operation, StoreCommand};
use crate::models::{CityId, CityInfo};
use crate::network::client::{ApiError, CitiesClient};
use crate::store::actor::StoreActor;
use crate::store::state::StoreState;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The handle outlived its store: the actor was shut down or panicked.
    #[error("City store is not running")]
    Closed,

    #[error("City store must be started from within a Tokio runtime")]
    NoRuntime,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Completion of one store operation
///
/// Resolves to the state right after the operation's response was applied.
/// Dropping it does not cancel the request.
#[derive(Debug)]
pub struct Pending {
    rx: oneshot::Receiver<StoreState>,
}

impl Future for Pending {
    type Output = Result<StoreState, StoreError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|r| r.map_err(|_| StoreError::Closed))
    }
}

/// Handle to a city store
///
/// Cheap to clone; every clone talks to the same store. The store keeps
/// running while any handle is alive or until `shutdown` is called.
#[derive(Clone, Debug)]
pub struct CityStore {
    commands: mpsc::UnboundedSender<StoreCommand>,
    state_rx: watch::Receiver<StoreState>,
}

impl CityStore {
    /// Start a store against `base_url` and begin loading the city list.
    ///
    /// Fails with `NoRuntime` outside a Tokio runtime.
    pub fn spawn(base_url: &str) -> Result<Self, StoreError> {
        Self::with_client(CitiesClient::new(base_url)?)
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        config.validate()?;
        Self::spawn(&config.base_url)
    }

    /// Start a store on an existing client and begin loading the city list.
    pub fn with_client(client: CitiesClient) -> Result<Self, StoreError> {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(StoreState::new());

        let actor = StoreActor::new(client, state_tx);
        runtime.spawn(actor.run(cmd_rx));

        let store = CityStore {
            commands: cmd_tx,
            state_rx,
        };
        // Completion is observable through subscribe() / ready()
        let _ = store.load_all();
        Ok(store)
    }

    /// Issue any operation; the named methods below are shorthands.
    pub fn dispatch(&self, op: Operation) -> Pending {
        let (reply, rx) = oneshot::channel();
        // If the actor is gone the reply sender is dropped with the command
        // and the Pending resolves to Closed.
        let _ = self.commands.send(StoreCommand::Execute {
            op,
            reply: Some(reply),
        });
        Pending { rx }
    }

    /// Fetch the full city list, replacing the current one.
    pub fn load_all(&self) -> Pending {
        self.dispatch(Operation::LoadAll)
    }

    /// Fetch one city into `current_city`.
    pub fn load_one(&self, id: impl Into<CityId>) -> Pending {
        self.dispatch(Operation::LoadOne(id.into()))
    }

    /// Store a new city and append the server's copy to the list.
    pub fn create(&self, city: CityInfo) -> Pending {
        self.dispatch(Operation::Create(city))
    }

    /// Delete a city and drop it from the list.
    pub fn remove(&self, id: impl Into<CityId>) -> Pending {
        self.dispatch(Operation::Remove(id.into()))
    }

    /// Latest state snapshot
    pub fn state(&self) -> StoreState {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every transition
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state_rx.clone()
    }

    /// Wait until at least one request has completed and none is running.
    ///
    /// Right after `spawn` this waits for the initial load. Fails with
    /// `Closed` once the store has stopped.
    pub async fn ready(&self) -> Result<StoreState, StoreError> {
        if !self.is_running() {
            return Err(StoreError::Closed);
        }
        let mut rx = self.state_rx.clone();
        let state = rx
            .wait_for(StoreState::is_settled)
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(state.clone())
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    /// Stop the store. Further operations resolve to `StoreError::Closed`.
    pub fn shutdown(&self) {
        let _ = self.commands.send(StoreCommand::Shutdown);
    }

    /// Wait until the store has stopped.
    pub async fn closed(&self) {
        self.commands.closed().await;
    }
}
