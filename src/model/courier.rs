use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store_actor::Record;

record_id!(
    /// Type-safe identifier for Couriers.
    CourierId,
    "courier"
);

/// A delivery company or driver that books parcels in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub id: CourierId,
    pub name: String,
    /// Trimmed. Unique.
    pub code: String,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Courier {
    type Id = CourierId;

    fn id(&self) -> CourierId {
        self.id
    }

    /// Indexed by code.
    fn key(&self) -> String {
        self.code.clone()
    }
}

/// Payload for registering a courier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierCreate {
    pub name: String,
    pub code: String,
    pub contact_phone: Option<String>,
}
