//! Append-only audit log.

use crate::model::{ParcelId, ParcelStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use store_actor::Record;

record_id!(
    /// Type-safe identifier for audit entries.
    AuditId,
    "audit"
);

/// Operator recorded for entries written by the system itself.
pub const SYSTEM_OPERATOR: &str = "SYSTEM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// The parcel outstayed the retention threshold.
    Expired,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditId,
    pub parcel_id: ParcelId,
    pub action: AuditAction,
    pub old_status: ParcelStatus,
    pub new_status: ParcelStatus,
    pub operator: String,
    pub created_at: DateTime<Utc>,
}

/// Idempotency key: one entry per parcel and action.
pub fn audit_key(parcel_id: ParcelId, action: AuditAction) -> String {
    format!("{}:{}", parcel_id.0, action)
}

impl Record for AuditEntry {
    type Id = AuditId;

    fn id(&self) -> AuditId {
        self.id
    }

    fn key(&self) -> String {
        audit_key(self.parcel_id, self.action)
    }
}
