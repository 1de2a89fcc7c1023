//! # Store Messages
//!
//! The request type sent from a [`StoreClient`](crate::StoreClient) to its
//! [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::state::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T, E> = oneshot::Sender<Result<T, StoreError<E>>>;

/// Request sent to the actor.
///
/// Two kinds of requests exist, mirroring the split in [`StoreState`]:
///
/// - **Action**: runs inside a transaction. Either every write it made is
///   committed, or none of them is visible afterwards.
/// - **Query**: reads the state as left by the last committed action.
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Action {
        action: S::Action,
        respond_to: Response<S::ActionResult, S::Error>,
    },
    Query {
        query: S::Query,
        respond_to: Response<S::QueryResult, S::Error>,
    },
}
