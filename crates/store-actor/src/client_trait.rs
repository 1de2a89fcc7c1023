//! # ActorClient Trait
//!
//! Common interface for domain-specific clients built on top of a shared
//! [`StoreClient`]. Implementors supply the inner client and an error mapping;
//! the trait supplies traced `apply` and `query` calls that already speak the
//! domain's error type.
use crate::{StoreClient, StoreError, StoreState};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`StoreClient`].
///
/// # Example
///
/// ```rust
/// use store_actor::{ActorClient, StoreClient, StoreError, StoreState};
/// use async_trait::async_trait;
///
/// #[derive(Debug, Clone, thiserror::Error)]
/// enum TallyError {
///     #[error("store unavailable: {0}")]
///     Unavailable(String),
///     #[error("tally would go negative")]
///     Negative,
/// }
///
/// struct Tally(i64);
///
/// impl StoreState for Tally {
///     type Action = i64;
///     type ActionResult = i64;
///     type Query = ();
///     type QueryResult = i64;
///     type Error = TallyError;
///     fn apply(&mut self, delta: i64) -> Result<i64, TallyError> {
///         if self.0 + delta < 0 { return Err(TallyError::Negative); }
///         self.0 += delta;
///         Ok(self.0)
///     }
///     fn query(&self, _: ()) -> Result<i64, TallyError> { Ok(self.0) }
///     fn begin(&mut self) {}
///     fn commit(&mut self) {}
///     fn rollback(&mut self) {}
/// }
///
/// struct TallyClient { inner: StoreClient<Tally> }
///
/// #[async_trait]
/// impl ActorClient<Tally> for TallyClient {
///     type Error = TallyError;
///     fn inner(&self) -> &StoreClient<Tally> { &self.inner }
///     fn map_error(e: StoreError<TallyError>) -> TallyError {
///         match e {
///             StoreError::Rejected(e) => e,
///             other => TallyError::Unavailable(other.to_string()),
///         }
///     }
/// }
///
/// async fn usage(client: TallyClient) -> Result<i64, TallyError> {
///     client.apply(5).await?;
///     client.query(()).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<S: StoreState>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError<S::Error>) -> Self::Error;

    /// Run an action as one transaction.
    #[tracing::instrument(skip(self))]
    async fn apply(&self, action: S::Action) -> Result<S::ActionResult, Self::Error> {
        tracing::debug!("Sending action");
        self.inner().apply(action).await.map_err(Self::map_error)
    }

    /// Run a read-only query.
    #[tracing::instrument(skip(self))]
    async fn query(&self, query: S::Query) -> Result<S::QueryResult, Self::Error> {
        tracing::debug!("Sending query");
        self.inner().query(query).await.map_err(Self::map_error)
    }
}
