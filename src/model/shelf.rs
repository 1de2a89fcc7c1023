//! Shelves and their slot accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store_actor::Record;

record_id!(
    /// Type-safe identifier for Shelves.
    ShelfId,
    "shelf"
);

/// Largest capacity a shelf may be created with.
pub const MAX_SHELF_CAPACITY: u32 = 10_000;

/// A physical shelf with a fixed number of parcel slots.
///
/// `current_load` counts the active parcels assigned to the shelf and stays
/// within `0..=capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: ShelfId,
    pub zone: String,
    /// Upper-case, trimmed. Unique.
    pub code: String,
    pub capacity: u32,
    pub current_load: u32,
    pub updated_at: DateTime<Utc>,
}

impl Shelf {
    pub fn has_room(&self) -> bool {
        self.current_load < self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.current_load >= self.capacity
    }
}

impl Record for Shelf {
    type Id = ShelfId;

    fn id(&self) -> ShelfId {
        self.id
    }

    /// Indexed by normalized code.
    fn key(&self) -> String {
        self.code.clone()
    }
}

/// Canonical form of a shelf code: surrounding whitespace removed, upper case.
pub fn normalize_shelf_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Payload for creating a shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfCreate {
    pub zone: String,
    pub code: String,
    pub capacity: u32,
}
