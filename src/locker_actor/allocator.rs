//! Shelf capacity accounting.
//!
//! A shelf's `current_load` moves only through [`LockerDb::occupy_slot`] and
//! [`LockerDb::release_slot`], both called from lifecycle transitions, which
//! keeps it equal to the number of active parcels on the shelf.

use super::db::LockerDb;
use super::error::LockerError;
use crate::model::{normalize_shelf_code, Shelf, ShelfCreate, ShelfId, MAX_SHELF_CAPACITY};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, warn};

impl LockerDb {
    pub(super) fn create_shelf(&mut self, params: ShelfCreate) -> Result<Shelf, LockerError> {
        if params.capacity == 0 || params.capacity > MAX_SHELF_CAPACITY {
            return Err(LockerError::InvalidCapacity(params.capacity));
        }
        let code = normalize_shelf_code(&params.code);
        if code.is_empty() {
            return Err(LockerError::InvalidInput("shelf code is blank".into()));
        }
        let zone = params.zone.trim().to_string();
        if zone.is_empty() {
            return Err(LockerError::InvalidInput("shelf zone is blank".into()));
        }
        if self.shelves.contains_key(&code) {
            return Err(LockerError::DuplicateCode(code));
        }

        let now = self.now();
        let shelf = self
            .shelves
            .insert_with(|id| Shelf {
                id,
                zone,
                code,
                capacity: params.capacity,
                current_load: 0,
                updated_at: now,
            })
            .clone();
        info!(shelf_id = %shelf.id, code = %shelf.code, capacity = shelf.capacity, "Shelf created");
        Ok(shelf)
    }

    /// Deletes an empty shelf. Both the recorded load and a fresh count of
    /// active parcels must be zero.
    pub(super) fn delete_shelf(&mut self, code: &str) -> Result<Shelf, LockerError> {
        let code = normalize_shelf_code(code);
        let shelf = self
            .shelves
            .latest_by_key(&code)
            .ok_or_else(|| LockerError::NotFound(format!("shelf {code}")))?;
        let shelf_id = shelf.id;
        if shelf.current_load > 0 || self.active_parcels_on(shelf_id) > 0 {
            return Err(LockerError::ShelfNotEmpty(code));
        }

        let removed = self
            .shelves
            .remove(shelf_id)
            .ok_or_else(|| LockerError::NotFound(format!("shelf {code}")))?;
        info!(shelf_id = %removed.id, code = %removed.code, "Shelf deleted");
        Ok(removed)
    }

    /// The lowest-id shelf with a free slot.
    pub(super) fn first_shelf_with_room(&self) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.has_room())
    }

    pub(super) fn occupy_slot(&mut self, shelf_id: ShelfId, now: DateTime<Utc>) {
        self.shelves.update(shelf_id, |s| {
            s.current_load += 1;
            s.updated_at = now;
        });
    }

    /// Gives a slot back. The load never drops below zero; a release that
    /// would do so is skipped and logged.
    pub(super) fn release_slot(&mut self, shelf_id: ShelfId, now: DateTime<Utc>) {
        let mut released = false;
        let shelf = self.shelves.update(shelf_id, |s| {
            if s.current_load > 0 {
                s.current_load -= 1;
                s.updated_at = now;
                released = true;
            }
        });
        match shelf {
            Some(_) if released => {}
            Some(shelf) => warn!(shelf = %shelf.code, "Shelf load already zero, release skipped"),
            None => warn!(%shelf_id, "Released slot on unknown shelf"),
        }
    }

    pub(super) fn active_parcels_on(&self, shelf_id: ShelfId) -> u32 {
        self.parcels
            .iter()
            .filter(|p| p.is_active() && p.shelf_id == Some(shelf_id))
            .count() as u32
    }

    /// Active parcel count per shelf.
    pub(super) fn active_parcels_by_shelf(&self) -> HashMap<ShelfId, u32> {
        let mut counts = HashMap::new();
        for shelf_id in self
            .parcels
            .iter()
            .filter(|p| p.is_active())
            .filter_map(|p| p.shelf_id)
        {
            *counts.entry(shelf_id).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{inbound, test_db};
    use super::*;
    use crate::model::ParcelStatus;

    fn shelf(zone: &str, code: &str, capacity: u32) -> ShelfCreate {
        ShelfCreate {
            zone: zone.into(),
            code: code.into(),
            capacity,
        }
    }

    #[test]
    fn test_create_shelf_normalizes_code() {
        let (mut db, _clock) = test_db(&[]);
        let created = db.create_shelf(shelf(" North ", " b-07 ", 30)).unwrap();

        assert_eq!(created.code, "B-07");
        assert_eq!(created.zone, "North");
        assert_eq!(created.current_load, 0);
        assert_eq!(
            db.create_shelf(shelf("South", "B-07", 5)).unwrap_err(),
            LockerError::DuplicateCode("B-07".into())
        );
    }

    #[test]
    fn test_create_shelf_validates_capacity() {
        let (mut db, _clock) = test_db(&[]);
        assert_eq!(
            db.create_shelf(shelf("N", "A1", 0)).unwrap_err(),
            LockerError::InvalidCapacity(0)
        );
        assert_eq!(
            db.create_shelf(shelf("N", "A1", 10_001)).unwrap_err(),
            LockerError::InvalidCapacity(10_001)
        );
        assert!(db.create_shelf(shelf("N", "A1", 10_000)).is_ok());
    }

    #[test]
    fn test_create_shelf_rejects_blank_fields() {
        let (mut db, _clock) = test_db(&[]);
        assert!(matches!(
            db.create_shelf(shelf("N", "   ", 3)),
            Err(LockerError::InvalidInput(_))
        ));
        assert!(matches!(
            db.create_shelf(shelf("", "A1", 3)),
            Err(LockerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_delete_shelf_requires_empty_shelf() {
        let (mut db, _clock) = test_db(&[("A1", 2), ("A2", 2)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();

        assert_eq!(
            db.delete_shelf("a1").unwrap_err(),
            LockerError::ShelfNotEmpty("A1".into())
        );
        assert_eq!(db.delete_shelf("A2").unwrap().code, "A2");
        assert!(matches!(db.delete_shelf("A2"), Err(LockerError::NotFound(_))));
    }

    #[test]
    fn test_delete_shelf_counts_parcels_even_when_load_drifted() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();
        let shelf_id = parcel.shelf_id.unwrap();
        db.shelves.update(shelf_id, |s| s.current_load = 0);

        assert!(matches!(db.delete_shelf("A1"), Err(LockerError::ShelfNotEmpty(_))));
    }

    #[test]
    fn test_release_slot_never_goes_negative() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let shelf_id = db.shelves.latest_by_key("A1").unwrap().id;
        let now = db.now();

        db.release_slot(shelf_id, now);

        assert_eq!(db.shelves.get(shelf_id).unwrap().current_load, 0);
    }

    #[test]
    fn test_active_counts_ignore_inactive_parcels() {
        let (mut db, _clock) = test_db(&[("A1", 3)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        db.inbound(inbound("SF2", "13800000001")).unwrap();
        db.set_status("SF2", ParcelStatus::Exception).unwrap();

        let shelf_id = db.shelves.latest_by_key("A1").unwrap().id;
        assert_eq!(db.active_parcels_on(shelf_id), 1);
        assert_eq!(db.active_parcels_by_shelf().get(&shelf_id), Some(&1));
    }
}
