//! # Mock Store & Testing Guide
//!
//! `MockClient<S>` hands out a real [`StoreClient<S>`] whose requests are
//! answered from a queue of scripted expectations instead of a running
//! actor. Use it to test the logic *around* the store (argument shaping,
//! result unpacking, error mapping) deterministically.
//!
//! ## When to use Mocks vs a Real Actor
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (scripted answers) | Real tables and transactions |
//! | **Determinism** | 100% | Subject to the scheduler |
//! | **Error Injection** | Easy (`return_err`, `close`) | Requires crafting state |
//! | **Use Case** | Client wrappers | The state itself, full system |
//!
//! ## Patterns
//!
//! - **Pattern 0: Client logic (pure mock)**: script answers with
//!   [`MockClient::expect_apply`] / [`MockClient::expect_query`], call the
//!   client under test, then [`MockClient::verify`].
//! - **Pattern 1: Message inspection**: [`create_mock_client`] returns the raw
//!   receiver; pull requests off it with [`expect_apply`] / [`expect_query`]
//!   and answer them by hand.
//! - **Pattern 2: Full system**: spawn a real [`StoreActor`](crate::StoreActor).
//!
//! ```rust
//! use store_actor::mock::MockClient;
//! use store_actor::StoreState;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("nope")]
//! struct Nope;
//!
//! struct Flag(bool);
//!
//! impl StoreState for Flag {
//!     type Action = bool;
//!     type ActionResult = bool;
//!     type Query = ();
//!     type QueryResult = bool;
//!     type Error = Nope;
//!     fn apply(&mut self, value: bool) -> Result<bool, Nope> { self.0 = value; Ok(value) }
//!     fn query(&self, _: ()) -> Result<bool, Nope> { Ok(self.0) }
//!     fn begin(&mut self) {}
//!     fn commit(&mut self) {}
//!     fn rollback(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Flag>::new();
//!     mock.expect_apply().return_ok(true);
//!     mock.expect_query().return_err(Nope);
//!
//!     let client = mock.client();
//!     assert!(client.apply(true).await.unwrap());
//!     assert!(client.query(()).await.is_err());
//!     mock.verify();
//! }
//! ```

use crate::{StoreClient, StoreError, StoreRequest, StoreState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request.
enum Expectation<S: StoreState> {
    Apply {
        response: Result<S::ActionResult, StoreError<S::Error>>,
    },
    Query {
        response: Result<S::QueryResult, StoreError<S::Error>>,
    },
    /// Drop the responder without answering.
    Drop,
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order. A request of the
/// wrong kind, or one arriving after the queue is empty, is recorded as a
/// failure and reported by [`verify`](Self::verify); the request itself sees
/// [`StoreError::ActorDropped`].
pub struct MockClient<S: StoreState> {
    client: StoreClient<S>,
    expectations: Expectations<S>,
    failures: Arc<Mutex<Vec<String>>>,
    seen: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreState> MockClient<S> {
    /// Creates a new mock with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let exps = expectations.clone();
        let fails = failures.clone();
        let log = seen.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = exps.lock().unwrap().pop_front();
                match (request, next) {
                    (StoreRequest::Action { action, respond_to }, Some(Expectation::Apply { response })) => {
                        log.lock().unwrap().push(format!("{action:?}"));
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Query { query, respond_to }, Some(Expectation::Query { response })) => {
                        log.lock().unwrap().push(format!("{query:?}"));
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Action { action, .. }, Some(Expectation::Drop)) => {
                        log.lock().unwrap().push(format!("{action:?}"));
                    }
                    (StoreRequest::Query { query, .. }, Some(Expectation::Drop)) => {
                        log.lock().unwrap().push(format!("{query:?}"));
                    }
                    (StoreRequest::Action { action, .. }, _) => {
                        fails.lock().unwrap().push(format!("unexpected action {action:?}"));
                    }
                    (StoreRequest::Query { query, .. }, _) => {
                        fails.lock().unwrap().push(format!("unexpected query {query:?}"));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            failures,
            seen,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects an action.
    pub fn expect_apply(&mut self) -> ApplyExpectationBuilder<S> {
        ApplyExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a query.
    pub fn expect_query(&mut self) -> QueryExpectationBuilder<S> {
        QueryExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects one request of any kind and drops its responder, as a crashed
    /// actor would.
    pub fn expect_drop(&mut self) {
        self.expectations.lock().unwrap().push_back(Expectation::Drop);
    }

    /// Debug renderings of every request that matched an expectation.
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed and no unexpected
    /// request arrived.
    pub fn verify(&self) {
        let failures = self.failures.lock().unwrap();
        if !failures.is_empty() {
            panic!("Unexpected requests: {failures:?}");
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for action expectations.
pub struct ApplyExpectationBuilder<S: StoreState> {
    expectations: Expectations<S>,
}

impl<S: StoreState> ApplyExpectationBuilder<S> {
    /// The action commits with `result`.
    pub fn return_ok(self, result: S::ActionResult) {
        self.push(Ok(result));
    }

    /// The action is rejected by the state.
    pub fn return_err(self, error: S::Error) {
        self.push(Err(StoreError::Rejected(error)));
    }

    /// The request fails in the store itself (closed, dropped, timed out).
    pub fn return_store_err(self, error: StoreError<S::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::ActionResult, StoreError<S::Error>>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply { response });
    }
}

/// Builder for query expectations.
pub struct QueryExpectationBuilder<S: StoreState> {
    expectations: Expectations<S>,
}

impl<S: StoreState> QueryExpectationBuilder<S> {
    pub fn return_ok(self, result: S::QueryResult) {
        self.push(Ok(result));
    }

    pub fn return_err(self, error: S::Error) {
        self.push(Err(StoreError::Rejected(error)));
    }

    pub fn return_store_err(self, error: StoreError<S::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::QueryResult, StoreError<S::Error>>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Query { response });
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Nothing answers automatically: pull each request off the receiver with
/// [`expect_apply`] or [`expect_query`] and reply through the returned
/// responder.
pub fn create_mock_client<S: StoreState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an action.
#[allow(clippy::type_complexity)]
pub async fn expect_apply<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(
    S::Action,
    oneshot::Sender<Result<S::ActionResult, StoreError<S::Error>>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a query.
#[allow(clippy::type_complexity)]
pub async fn expect_query<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(
    S::Query,
    oneshot::Sender<Result<S::QueryResult, StoreError<S::Error>>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Query { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}
