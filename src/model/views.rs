//! Read-only projections returned by list and report queries.

use crate::model::ParcelStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parcel as its recipient sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelView {
    pub tracking_number: String,
    pub courier_name: Option<String>,
    /// Present only while the parcel waits on a shelf.
    pub pickup_code: Option<String>,
    pub shelf_zone: Option<String>,
    pub status: ParcelStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A parcel as the delivering courier sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierTask {
    pub tracking_number: String,
    pub recipient_phone: Option<String>,
    pub status: ParcelStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Active parcels.
    pub waiting_pickup: u64,
    /// Shelves with no free slot.
    pub full_shelves: u64,
    /// Inbounds plus pickups on the current UTC day.
    pub today_ops: u64,
}

/// A shelf whose recorded load disagrees with its active parcels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDiscrepancy {
    pub shelf_code: String,
    pub recorded_load: u32,
    pub active_parcels: u32,
}
