//! Store actor - owns the state, issues requests, applies transitions

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;

use crate::constants::{DELETE_ERROR_MESSAGE, LOAD_ERROR_MESSAGE};
use crate::messages::{Completion, NetworkResult, Operation, StoreCommand};
use crate::models::CityId;
use crate::network::client::{ApiError, CitiesClient};
use crate::store::reducer::{Action, CityReducer, Reducer};
use crate::store::state::StoreState;

/// Processes store commands and request completions
///
/// Requests are not fenced: completions are applied in arrival order, so
/// with several requests in flight the last one to return wins.
pub struct StoreActor {
    client: CitiesClient,
    state: StoreState,
    state_tx: watch::Sender<StoreState>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    requests: JoinSet<()>,
    replies: HashMap<u64, oneshot::Sender<StoreState>>,
    next_request_id: u64,
}

impl StoreActor {
    pub fn new(client: CitiesClient, state_tx: watch::Sender<StoreState>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let state = state_tx.borrow().clone();
        StoreActor {
            client,
            state,
            state_tx,
            completion_tx,
            completion_rx,
            requests: JoinSet::new(),
            replies: HashMap::new(),
            next_request_id: 1,
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<StoreCommand>) {
        tracing::info!(base_url = %self.client.base_url(), "City store started");

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(StoreCommand::Execute { op, reply }) => self.execute(op, reply),
                        Some(StoreCommand::Shutdown) | None => break,
                    }
                }

                Some(done) = self.completion_rx.recv() => self.complete(done),

                // Reap finished request tasks
                Some(_result) = self.requests.join_next() => {}
            }
        }

        // In-flight requests run to completion; their results go nowhere.
        self.requests.detach_all();
        tracing::info!("City store stopped");
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    fn execute(&mut self, op: Operation, reply: Option<oneshot::Sender<StoreState>>) {
        let request_id = self.next_id();
        tracing::info!(request_id, op = op.name(), "{}", op);

        self.apply(Action::Loading);
        if let Some(reply) = reply {
            self.replies.insert(request_id, reply);
        }

        let client = self.client.clone();
        let completion_tx = self.completion_tx.clone();

        self.requests.spawn(async move {
            let result = match op {
                Operation::LoadAll => NetworkResult::Cities(client.fetch_cities().await),
                Operation::LoadOne(id) => NetworkResult::City(client.fetch_city(&id).await),
                Operation::Create(city) => NetworkResult::Created(client.create_city(&city).await),
                Operation::Remove(id) => {
                    let result = client.delete_city(&id).await;
                    NetworkResult::Deleted { id, result }
                }
            };
            let _ = completion_tx.send(Completion { request_id, result });
        });
    }

    fn complete(&mut self, done: Completion) {
        let action = settle(done.request_id, done.result);
        self.apply(action);

        if let Some(reply) = self.replies.remove(&done.request_id) {
            let _ = reply.send(self.state.clone());
        }
    }

    fn apply(&mut self, action: Action) {
        tracing::debug!(revision = self.state.revision + 1, ?action, "Applying transition");
        let state = std::mem::take(&mut self.state);
        self.state = CityReducer::reduce(state, action);
        self.state_tx.send_replace(self.state.clone());
    }
}

/// Turn a request outcome into the transition it causes
fn settle(request_id: u64, result: NetworkResult) -> Action {
    match result {
        NetworkResult::Cities(Ok(cities)) => {
            tracing::info!(request_id, count = cities.len(), "Cities loaded");
            Action::CitiesLoaded(cities)
        }
        NetworkResult::City(Ok(city)) => {
            tracing::info!(request_id, id = %city.id, "City loaded");
            Action::CityLoaded(city)
        }
        NetworkResult::Created(Ok(city)) => {
            tracing::info!(request_id, id = %city.id, "City created");
            Action::CityCreated(city)
        }
        NetworkResult::Deleted { id, result: Ok(()) } => {
            tracing::info!(request_id, id = %id, "City deleted");
            Action::CityDeleted(id)
        }
        NetworkResult::Deleted { id, result: Err(e) } => {
            rejected(request_id, &e, DELETE_ERROR_MESSAGE, Some(&id))
        }
        NetworkResult::Cities(Err(e))
        | NetworkResult::City(Err(e))
        | NetworkResult::Created(Err(e)) => rejected(request_id, &e, LOAD_ERROR_MESSAGE, None),
    }
}

fn rejected(
    request_id: u64,
    error: &ApiError,
    message: &str,
    id: Option<&CityId>,
) -> Action {
    match id {
        Some(id) => tracing::warn!(request_id, id = %id, error = %error, "Request failed"),
        None => tracing::warn!(request_id, error = %error, "Request failed"),
    }
    Action::Rejected(message.to_string())
}
