//! Parcels and their lifecycle status.

use crate::model::{CourierId, ShelfId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use store_actor::Record;

record_id!(
    /// Type-safe identifier for Parcels.
    ParcelId,
    "parcel"
);

/// Where a parcel is in its lifecycle.
///
/// ```text
///   inbound            pickup
///  ────────▶ stored ───────────▶ picked_up
///
///  admin overwrite: any ──▶ {pending, stored, exception, returned}
/// ```
///
/// `pending` and `stored` are the *active* states: the parcel occupies a
/// shelf slot and carries a pickup code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    Pending,
    Stored,
    PickedUp,
    Exception,
    Returned,
}

impl ParcelStatus {
    pub const ALL: [ParcelStatus; 5] = [
        ParcelStatus::Pending,
        ParcelStatus::Stored,
        ParcelStatus::PickedUp,
        ParcelStatus::Exception,
        ParcelStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelStatus::Pending => "pending",
            ParcelStatus::Stored => "stored",
            ParcelStatus::PickedUp => "picked_up",
            ParcelStatus::Exception => "exception",
            ParcelStatus::Returned => "returned",
        }
    }

    /// `true` while the parcel holds a shelf slot.
    pub fn is_active(&self) -> bool {
        matches!(self, ParcelStatus::Pending | ParcelStatus::Stored)
    }

    /// Statuses an administrator may set directly. `picked_up` is reachable
    /// only through a pickup.
    pub fn is_admin_settable(&self) -> bool {
        !matches!(self, ParcelStatus::PickedUp)
    }
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name a parcel status.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown parcel status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ParcelStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ParcelStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A parcel held by the locker.
///
/// Produced by inbound with `status = stored`, a shelf and a pickup code;
/// pickup clears both. Rows are never deleted, so a tracking number may map
/// to several rows over time, of which at most one is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub tracking_number: String,
    pub user_id: UserId,
    pub courier_id: CourierId,
    pub shelf_id: Option<ShelfId>,
    pub pickup_code: Option<String>,
    pub status: ParcelStatus,
    /// Who booked the parcel in.
    pub operator: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub picked_up_at: Option<DateTime<Utc>>,
}

impl Parcel {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl Record for Parcel {
    type Id = ParcelId;

    fn id(&self) -> ParcelId {
        self.id
    }

    /// Indexed by tracking number.
    fn key(&self) -> String {
        self.tracking_number.clone()
    }
}

/// Payload for booking a parcel in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundRequest {
    pub tracking_number: String,
    /// Recipient's phone; the user is created on first sight.
    pub recipient_phone: String,
    /// Code of the delivering courier.
    pub courier_code: String,
    pub operator: String,
}

/// Payload for a pickup attempt.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupRequest {
    pub tracking_number: String,
    pub pickup_code: String,
    pub user_id: UserId,
}

// Keep pickup codes out of logs and spans.
impl fmt::Debug for PickupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickupRequest")
            .field("tracking_number", &self.tracking_number)
            .field("pickup_code", &"******")
            .field("user_id", &self.user_id)
            .finish()
    }
}
