use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store_actor::Record;

record_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

/// Display name given to users created without one.
pub const DEFAULT_STUDENT_NAME: &str = "student";

/// A parcel recipient, identified by phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub phone: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    /// Indexed by phone.
    fn key(&self) -> String {
        self.phone.clone()
    }
}
