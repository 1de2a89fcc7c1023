#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use parcel_locker::config::LockerConfig;
use parcel_locker::lifecycle::LockerSystem;
use parcel_locker::locker_actor::LockerDb;
use parcel_locker::model::{CourierCreate, InboundRequest, Parcel, PickupRequest, ShelfCreate};
use parcel_locker::time::ManualTimeSource;
use std::sync::Arc;

/// A running locker on a manual clock with courier `SF` registered and the
/// given `(code, capacity)` shelves created.
pub async fn start_locker(shelves: &[(&str, u32)]) -> (LockerSystem, ManualTimeSource) {
    let clock = ManualTimeSource::new(Utc.with_ymd_and_hms(2024, 9, 2, 9, 30, 0).unwrap());
    let system = LockerSystem::with_time_source(LockerConfig::for_testing(), Arc::new(clock.clone()));

    system
        .couriers
        .register(CourierCreate {
            name: "SF Express".to_string(),
            code: "SF".to_string(),
            contact_phone: None,
        })
        .await
        .expect("Failed to register courier");
    for (code, capacity) in shelves {
        system
            .shelves
            .create_shelf(ShelfCreate {
                zone: "North".to_string(),
                code: code.to_string(),
                capacity: *capacity,
            })
            .await
            .expect("Failed to create shelf");
    }
    (system, clock)
}

pub fn inbound(tracking_number: &str, phone: &str) -> InboundRequest {
    InboundRequest {
        tracking_number: tracking_number.to_string(),
        recipient_phone: phone.to_string(),
        courier_code: "SF".to_string(),
        operator: "front-desk".to_string(),
    }
}

/// The pickup a parcel's rightful owner would make.
pub fn owner_pickup(parcel: &Parcel) -> PickupRequest {
    PickupRequest {
        tracking_number: parcel.tracking_number.clone(),
        pickup_code: parcel.pickup_code.clone().expect("Stored parcel has a code"),
        user_id: parcel.user_id,
    }
}

/// Asserts every shelf's load equals its active parcel count.
pub fn assert_loads_consistent(db: &LockerDb) {
    for shelf in db.shelves().iter() {
        let active = db
            .parcels()
            .iter()
            .filter(|p| p.is_active() && p.shelf_id == Some(shelf.id))
            .count() as u32;
        assert_eq!(shelf.current_load, active, "shelf {} drifted", shelf.code);
        assert!(shelf.current_load <= shelf.capacity);
    }
}
