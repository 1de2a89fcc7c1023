//! # Store Actor
//!
//! This module defines the `StoreActor`, the server half of the store. It
//! owns the state value and the receiving end of the request channel, and
//! processes requests strictly one at a time.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::state::StoreState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns a [`StoreState`].
///
/// # Concurrency Model
/// Any number of tasks may hold a clone of the [`StoreClient`], but the actor
/// drains its channel sequentially. Two requests never interleave, so every
/// action runs with serializable isolation without a `Mutex` in sight. Each
/// action is additionally wrapped in [`StoreState::transact`], which makes it
/// all-or-nothing.
///
/// # Usage Pattern
///
/// 1.  **Create**: call `StoreActor::new()` with the initial state to get the
///     `actor` and its `client`.
/// 2.  **Run**: spawn `actor.run()` on the runtime.
/// 3.  **Share**: clone the client into every component that needs the store.
///
/// Dropping every client closes the channel; the actor then finishes the
/// requests already queued and returns.
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full,
    ///   callers wait for space (bounded by the client's timeout, if any).
    /// * `state` - The initial state the actor takes ownership of.
    pub fn new(buffer_size: usize, state: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self { receiver, state };
        (actor, StoreClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// Returns the final state, which lets tests and shutdown code inspect
    /// what was committed.
    pub async fn run(mut self) -> S {
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Store actor started");

        let mut committed: u64 = 0;
        let mut rolled_back: u64 = 0;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Action { action, respond_to } => {
                    debug!(state_type, ?action, "Action");
                    let result = self.state.transact(action);
                    match &result {
                        Ok(_) => {
                            committed += 1;
                            info!(state_type, committed, "Committed");
                        }
                        Err(e) => {
                            rolled_back += 1;
                            warn!(state_type, error = %e, "Rolled back");
                        }
                    }
                    let _ = respond_to.send(result.map_err(StoreError::Rejected));
                }
                StoreRequest::Query { query, respond_to } => {
                    debug!(state_type, ?query, "Query");
                    let result = self.state.query(query);
                    if let Err(e) = &result {
                        debug!(state_type, error = %e, "Query rejected");
                    }
                    let _ = respond_to.send(result.map_err(StoreError::Rejected));
                }
            }
        }

        info!(state_type, committed, rolled_back, "Shutdown");
        self.state
    }
}
