//! # StoreState Trait
//!
//! The `StoreState` trait is the contract a value must satisfy to be owned by
//! a [`StoreActor`](crate::StoreActor). It names the typed requests the state
//! understands (mutating *actions* and read-only *queries*), their results,
//! and the error type, and it exposes the three transaction hooks the actor
//! drives around every action.
//!
//! # Architecture Note
//! The actor processes one request at a time, so every action already sees a
//! consistent state and nobody can observe it half-way. What sequential
//! processing does *not* give us is atomicity: an action that inserts a row
//! and then fails on a later step would leave the insert behind. The
//! `begin` / `commit` / `rollback` hooks close that gap. The usual way to
//! implement them is to delegate to the [`Table`](crate::Table)s the state is
//! made of, which journal every write while a transaction is open.

use std::fmt::Debug;

/// A value owned by a store actor.
///
/// # Example
///
/// ```rust
/// use store_actor::StoreState;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter would go negative")]
/// struct Underflow;
///
/// #[derive(Debug)]
/// enum CounterAction { Add(i64) }
///
/// struct Counter { value: i64, saved: Option<i64> }
///
/// impl StoreState for Counter {
///     type Action = CounterAction;
///     type ActionResult = i64;
///     type Query = ();
///     type QueryResult = i64;
///     type Error = Underflow;
///
///     fn apply(&mut self, action: CounterAction) -> Result<i64, Underflow> {
///         let CounterAction::Add(delta) = action;
///         self.value += delta;
///         if self.value < 0 { return Err(Underflow); }
///         Ok(self.value)
///     }
///
///     fn query(&self, _: ()) -> Result<i64, Underflow> { Ok(self.value) }
///
///     fn begin(&mut self) { self.saved = Some(self.value); }
///     fn commit(&mut self) { self.saved = None; }
///     fn rollback(&mut self) {
///         if let Some(value) = self.saved.take() { self.value = value; }
///     }
/// }
///
/// let mut counter = Counter { value: 1, saved: None };
/// assert!(counter.transact(CounterAction::Add(-5)).is_err());
/// assert_eq!(counter.value, 1);
/// ```
pub trait StoreState: Send + 'static {
    /// Enum of state-changing operations.
    type Action: Send + Debug;

    /// Result returned by a committed action.
    type ActionResult: Send + Debug;

    /// Enum of read-only operations.
    type Query: Send + Debug;

    /// Result returned by a query.
    type QueryResult: Send + Debug;

    /// The error type for rejected actions and queries.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum covers the whole state rather than one per action.
    /// Clients deal with a single type and pattern match on the variants they
    /// care about.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes an action against the state.
    ///
    /// Called between [`begin`](Self::begin) and either
    /// [`commit`](Self::commit) (on `Ok`) or [`rollback`](Self::rollback)
    /// (on `Err`). Implementations may freely write before discovering that
    /// the action must fail.
    fn apply(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Answers a read-only query. Never runs inside a transaction.
    fn query(&self, query: Self::Query) -> Result<Self::QueryResult, Self::Error>;

    /// Opens a transaction.
    fn begin(&mut self);

    /// Makes every write since [`begin`](Self::begin) permanent.
    fn commit(&mut self);

    /// Undoes every write since [`begin`](Self::begin).
    fn rollback(&mut self);

    /// Runs `action` as one all-or-nothing unit.
    fn transact(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error> {
        self.begin();
        match self.apply(action) {
            Ok(result) => {
                self.commit();
                Ok(result)
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }
}
