//! # Store Client
//!
//! The typed handle used to send requests to a [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::state::StoreState;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `StoreActor`.
///
/// * **Cloneable**: holds only a sender, so cloning is cheap and every clone
///   talks to the same actor.
/// * **Bounded waits**: with [`with_timeout`](Self::with_timeout) set, a
///   request that is not answered in time fails with
///   [`StoreError::Timeout`] instead of waiting forever.
///
/// A timed-out action may still commit later, once the actor reaches it in
/// the queue. Callers that retry must be prepared for the first attempt to
/// have landed.
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
    timeout: Option<Duration>,
}

impl<S: StoreState> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: self.timeout,
        }
    }
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self {
            sender,
            timeout: None,
        }
    }

    /// Returns a client that gives up on requests after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `true` once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Runs an action as one transaction.
    pub async fn apply(&self, action: S::Action) -> Result<S::ActionResult, StoreError<S::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.bounded(self.roundtrip(StoreRequest::Action { action, respond_to }, response))
            .await
    }

    /// Runs a read-only query.
    pub async fn query(&self, query: S::Query) -> Result<S::QueryResult, StoreError<S::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.bounded(self.roundtrip(StoreRequest::Query { query, respond_to }, response))
            .await
    }

    async fn roundtrip<T>(
        &self,
        request: StoreRequest<S>,
        response: oneshot::Receiver<Result<T, StoreError<S::Error>>>,
    ) -> Result<T, StoreError<S::Error>> {
        self.sender
            .send(request)
            .await
            .map_err(|_| StoreError::<S::Error>::ActorClosed)?;
        response.await.map_err(|_| StoreError::<S::Error>::ActorDropped)?
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, StoreError<S::Error>>>,
    ) -> Result<T, StoreError<S::Error>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| StoreError::<S::Error>::Timeout(limit))?,
            None => request.await,
        }
    }
}
