//! # Store Errors
//!
//! Errors produced by the store actor and its client. The state's own error
//! type travels inside [`StoreError::Rejected`] untouched, so callers can
//! still match on their domain variants after the round trip through the
//! actor's channels.

/// Errors that can occur while talking to a [`StoreActor`](crate::StoreActor).
#[derive(Debug, thiserror::Error)]
pub enum StoreError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The actor's request channel is closed (the actor has stopped).
    #[error("Store actor closed")]
    ActorClosed,
    /// The actor dropped the response channel before answering.
    #[error("Store actor dropped response channel")]
    ActorDropped,
    /// No answer arrived within the client's request timeout.
    #[error("Store request timed out after {0:?}")]
    Timeout(std::time::Duration),
    /// The state rejected the request; the transaction was rolled back.
    #[error(transparent)]
    Rejected(E),
}

impl<E> StoreError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// `true` for infrastructure failures a caller may retry.
    ///
    /// A rejection is a verdict of the state itself and retrying the same
    /// request yields the same verdict.
    pub fn is_transient(&self) -> bool {
        !matches!(self, StoreError::Rejected(_))
    }
}
