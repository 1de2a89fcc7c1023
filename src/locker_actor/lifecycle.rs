//! Parcel lifecycle: inbound, pickup and the administrator overwrite.
//!
//! Each function runs inside the transaction the store actor opened for the
//! action, so a failure at any step discards the earlier writes as well.

use super::db::LockerDb;
use super::error::LockerError;
use crate::model::{InboundRequest, Parcel, ParcelStatus, PickupRequest};
use tracing::{info, warn};

impl LockerDb {
    /// Books a parcel in: resolve the recipient, resolve the courier, take a
    /// slot on the first shelf with room and store the parcel with a fresh
    /// pickup code.
    pub(super) fn inbound(&mut self, request: InboundRequest) -> Result<Parcel, LockerError> {
        let tracking_number = request.tracking_number.trim().to_string();
        if tracking_number.is_empty() {
            return Err(LockerError::InvalidInput("tracking number is blank".into()));
        }
        let phone = request.recipient_phone.trim();
        if phone.is_empty() {
            return Err(LockerError::InvalidInput("recipient phone is blank".into()));
        }
        if self.parcels.by_key(&tracking_number).any(Parcel::is_active) {
            return Err(LockerError::DuplicateTracking(tracking_number));
        }

        let user_id = self.resolve_user(phone, None);
        let courier_code = request.courier_code.trim();
        let courier_id = self
            .couriers
            .latest_by_key(courier_code)
            .map(|c| c.id)
            .ok_or_else(|| LockerError::NotFound(format!("courier {courier_code}")))?;
        let shelf = self.first_shelf_with_room().ok_or(LockerError::NoCapacity)?;
        let (shelf_id, shelf_code) = (shelf.id, shelf.code.clone());

        let now = self.now();
        let pickup_code = self.next_pickup_code();
        let operator = request.operator.trim().to_string();
        let parcel = self
            .parcels
            .insert_with(|id| Parcel {
                id,
                tracking_number,
                user_id,
                courier_id,
                shelf_id: Some(shelf_id),
                pickup_code: Some(pickup_code),
                status: ParcelStatus::Stored,
                operator,
                created_at: now,
                updated_at: now,
                picked_up_at: None,
            })
            .clone();
        self.occupy_slot(shelf_id, now);

        info!(
            parcel_id = %parcel.id,
            tracking_number = %parcel.tracking_number,
            shelf = %shelf_code,
            "Parcel stored"
        );
        Ok(parcel)
    }

    /// Releases a stored parcel to its owner.
    ///
    /// The match on tracking number, code, owner and `stored` status and the
    /// transition to `picked_up` happen in the same transaction, so of any
    /// number of concurrent attempts exactly one can win.
    pub(super) fn pickup(&mut self, request: PickupRequest) -> Result<Parcel, LockerError> {
        let tracking_number = request.tracking_number.trim();
        let code = request.pickup_code.trim();
        let parcel_id = self
            .parcels
            .by_key(tracking_number)
            .rev()
            .find(|p| {
                p.status == ParcelStatus::Stored
                    && p.user_id == request.user_id
                    && p.pickup_code.as_deref() == Some(code)
            })
            .map(|p| p.id)
            .ok_or(LockerError::PickupRejected)?;

        let now = self.now();
        let mut released_from = None;
        let parcel = self
            .parcels
            .update(parcel_id, |p| {
                released_from = p.shelf_id.take();
                p.status = ParcelStatus::PickedUp;
                p.pickup_code = None;
                p.picked_up_at = Some(now);
                p.updated_at = now;
            })
            .cloned()
            .ok_or(LockerError::PickupRejected)?;

        match released_from {
            Some(shelf_id) => self.release_slot(shelf_id, now),
            None => warn!(parcel_id = %parcel.id, "Stored parcel had no shelf"),
        }

        info!(parcel_id = %parcel.id, tracking_number = %parcel.tracking_number, "Parcel picked up");
        Ok(parcel)
    }

    /// Overwrites the status of the newest parcel with this tracking number.
    ///
    /// No transition rules apply and neither the shelf load nor the pickup
    /// code is touched; drift this causes shows up in the shelf load report.
    pub(super) fn set_status(
        &mut self,
        tracking_number: &str,
        status: ParcelStatus,
    ) -> Result<Parcel, LockerError> {
        if !status.is_admin_settable() {
            return Err(LockerError::InvalidStatus(status.to_string()));
        }
        let tracking_number = tracking_number.trim();
        let parcel_id = self
            .parcels
            .latest_by_key(tracking_number)
            .map(|p| p.id)
            .ok_or_else(|| LockerError::NotFound(format!("parcel {tracking_number}")))?;

        let now = self.now();
        let mut previous = status;
        let parcel = self
            .parcels
            .update(parcel_id, |p| {
                previous = p.status;
                p.status = status;
                p.updated_at = now;
            })
            .cloned()
            .ok_or_else(|| LockerError::NotFound(format!("parcel {tracking_number}")))?;

        info!(
            parcel_id = %parcel.id,
            from = %previous,
            to = %status,
            "Parcel status overwritten"
        );
        Ok(parcel)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{inbound, test_db};
    use super::*;
    use crate::model::UserId;
    use store_actor::StoreState;

    #[test]
    fn test_inbound_stores_parcel_on_first_free_shelf() {
        let (mut db, _clock) = test_db(&[("A1", 1), ("A2", 5)]);

        let first = db.inbound(inbound("SF1", "13800000001")).unwrap();
        let second = db.inbound(inbound("SF2", "13800000001")).unwrap();

        assert_eq!(first.status, ParcelStatus::Stored);
        assert_eq!(first.pickup_code.as_ref().map(String::len), Some(6));
        assert_eq!(first.operator, "desk");
        assert_eq!(db.shelves().latest_by_key("A1").unwrap().current_load, 1);
        assert_eq!(second.shelf_id, Some(db.shelves().latest_by_key("A2").unwrap().id));
        assert_eq!(first.user_id, second.user_id);
        assert_eq!(db.users().len(), 1);
    }

    #[test]
    fn test_inbound_rejects_active_duplicate() {
        let (mut db, _clock) = test_db(&[("A1", 5)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();

        let result = db.transact(crate::locker_actor::LockerAction::Inbound(inbound(
            "SF1",
            "13800000002",
        )));

        assert!(matches!(result, Err(LockerError::DuplicateTracking(t)) if t == "SF1"));
        assert_eq!(db.parcels().len(), 1);
        assert_eq!(db.users().len(), 1);
    }

    #[test]
    fn test_inbound_without_capacity_leaves_no_trace() {
        let (mut db, _clock) = test_db(&[("A1", 1)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();

        let result = db.transact(crate::locker_actor::LockerAction::Inbound(inbound(
            "SF2",
            "13900000009",
        )));

        assert_eq!(result.unwrap_err(), LockerError::NoCapacity);
        assert_eq!(db.parcels().len(), 1);
        assert!(!db.users().contains_key("13900000009"));
        assert_eq!(db.shelves().latest_by_key("A1").unwrap().current_load, 1);
    }

    #[test]
    fn test_inbound_unknown_courier() {
        let (mut db, _clock) = test_db(&[("A1", 1)]);
        let mut request = inbound("SF1", "13800000001");
        request.courier_code = "NOPE".into();

        assert!(matches!(db.inbound(request), Err(LockerError::NotFound(_))));
    }

    #[test]
    fn test_inbound_blank_fields() {
        let (mut db, _clock) = test_db(&[("A1", 1)]);
        assert!(matches!(
            db.inbound(inbound("  ", "13800000001")),
            Err(LockerError::InvalidInput(_))
        ));
        assert!(matches!(
            db.inbound(inbound("SF1", "")),
            Err(LockerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_pickup_releases_slot_and_clears_code() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();

        let picked = db
            .pickup(PickupRequest {
                tracking_number: "SF1".into(),
                pickup_code: parcel.pickup_code.clone().unwrap(),
                user_id: parcel.user_id,
            })
            .unwrap();

        assert_eq!(picked.status, ParcelStatus::PickedUp);
        assert_eq!(picked.pickup_code, None);
        assert_eq!(picked.shelf_id, None);
        assert!(picked.picked_up_at.is_some());
        assert_eq!(db.shelves().latest_by_key("A1").unwrap().current_load, 0);
    }

    #[test]
    fn test_pickup_rejections_are_indistinguishable() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();
        let code = parcel.pickup_code.clone().unwrap();

        let wrong_code = db.pickup(PickupRequest {
            tracking_number: "SF1".into(),
            pickup_code: "not-a-code".into(),
            user_id: parcel.user_id,
        });
        let wrong_owner = db.pickup(PickupRequest {
            tracking_number: "SF1".into(),
            pickup_code: code.clone(),
            user_id: UserId(999),
        });
        let unknown = db.pickup(PickupRequest {
            tracking_number: "SF404".into(),
            pickup_code: code,
            user_id: parcel.user_id,
        });

        for result in [wrong_code, wrong_owner, unknown] {
            assert_eq!(result.unwrap_err(), LockerError::PickupRejected);
        }
        assert_eq!(db.shelves().latest_by_key("A1").unwrap().current_load, 1);
    }

    #[test]
    fn test_second_pickup_is_rejected() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();
        let request = PickupRequest {
            tracking_number: "SF1".into(),
            pickup_code: parcel.pickup_code.clone().unwrap(),
            user_id: parcel.user_id,
        };

        db.pickup(request.clone()).unwrap();
        assert_eq!(db.pickup(request).unwrap_err(), LockerError::PickupRejected);
    }

    #[test]
    fn test_tracking_number_reusable_after_pickup() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();
        db.pickup(PickupRequest {
            tracking_number: "SF1".into(),
            pickup_code: parcel.pickup_code.unwrap(),
            user_id: parcel.user_id,
        })
        .unwrap();

        let again = db.inbound(inbound("SF1", "13800000001")).unwrap();

        assert_ne!(again.id, parcel.id);
        assert_eq!(db.parcels().by_key("SF1").count(), 2);
    }

    #[test]
    fn test_set_status_overwrites_without_side_effects() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();

        let updated = db.set_status("SF1", ParcelStatus::Returned).unwrap();

        assert_eq!(updated.status, ParcelStatus::Returned);
        assert_eq!(updated.pickup_code, parcel.pickup_code);
        assert_eq!(updated.shelf_id, parcel.shelf_id);
        assert_eq!(db.shelves().latest_by_key("A1").unwrap().current_load, 1);
    }

    #[test]
    fn test_set_status_rejects_picked_up_and_unknown_parcel() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();

        assert!(matches!(
            db.set_status("SF1", ParcelStatus::PickedUp),
            Err(LockerError::InvalidStatus(_))
        ));
        assert!(matches!(
            db.set_status("SF2", ParcelStatus::Exception),
            Err(LockerError::NotFound(_))
        ));
        assert_eq!(
            db.parcels().latest_by_key("SF1").unwrap().status,
            ParcelStatus::Stored
        );
    }
}
