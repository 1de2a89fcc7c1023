//! Error types for the locker store.

use crate::model::ParseStatusError;
use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during locker operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LockerError {
    /// The tracking number, shelf, courier or user does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The tracking number belongs to a parcel that is still on a shelf.
    #[error("Tracking number already active: {0}")]
    DuplicateTracking(String),

    /// A shelf or courier with this code already exists.
    #[error("Code already in use: {0}")]
    DuplicateCode(String),

    /// Every shelf is at capacity.
    #[error("No shelf has a free slot")]
    NoCapacity,

    /// No stored parcel matches the tracking number, code and owner.
    /// Does not say which part failed.
    #[error("Pickup rejected")]
    PickupRejected,

    /// The shelf still holds active parcels.
    #[error("Shelf not empty: {0}")]
    ShelfNotEmpty(String),

    /// The status text is unknown or may not be set by an administrator.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Shelf capacity outside `1..=10000`.
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(u32),

    /// A required field is blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The courier is still referenced by parcels.
    #[error("Courier in use: {0}")]
    CourierInUse(String),

    /// The store did not answer: closed, crashed or timed out.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl LockerError {
    /// Only storage failures are worth retrying; every other variant is a
    /// verdict on the request itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LockerError::StorageUnavailable(_))
    }
}

impl From<StoreError<LockerError>> for LockerError {
    fn from(e: StoreError<LockerError>) -> Self {
        match e {
            StoreError::Rejected(e) => e,
            other => LockerError::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<ParseStatusError> for LockerError {
    fn from(e: ParseStatusError) -> Self {
        LockerError::InvalidStatus(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_store_errors_map_to_storage_unavailable() {
        for e in [
            StoreError::ActorClosed,
            StoreError::ActorDropped,
            StoreError::Timeout(Duration::from_millis(10)),
        ] {
            let mapped = LockerError::from(e);
            assert!(matches!(mapped, LockerError::StorageUnavailable(_)));
            assert!(mapped.is_retryable());
        }
    }

    #[test]
    fn test_rejections_pass_through() {
        let mapped = LockerError::from(StoreError::Rejected(LockerError::NoCapacity));
        assert_eq!(mapped, LockerError::NoCapacity);
        assert!(!mapped.is_retryable());
    }
}
