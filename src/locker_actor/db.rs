//! The state owned by the locker's store actor.

use super::actions::{LockerAction, LockerActionResult, LockerQuery, LockerQueryResult};
use super::error::LockerError;
use crate::config::LockerConfig;
use crate::model::{AuditEntry, Courier, Parcel, Shelf, User};
use crate::time::TimeSource;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use store_actor::{StoreState, Table};

/// Random fixed-length numeric pickup codes. Codes are not checked for
/// collisions; a code only unlocks together with its tracking number and
/// owner.
pub struct PickupCodeGenerator {
    rng: StdRng,
    length: usize,
}

impl PickupCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            length,
        }
    }

    /// Deterministic codes, for tests.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            length,
        }
    }

    pub fn next_code(&mut self) -> String {
        (0..self.length)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }
}

/// Every table of the locker, plus the clock and code generator the
/// lifecycle rules need.
///
/// Only the store actor holds a `LockerDb`, so each action sees the tables
/// exactly as the previous committed action left them.
pub struct LockerDb {
    pub(super) parcels: Table<Parcel>,
    pub(super) shelves: Table<Shelf>,
    pub(super) users: Table<User>,
    pub(super) couriers: Table<Courier>,
    pub(super) audit: Table<AuditEntry>,
    pub(super) config: LockerConfig,
    clock: Arc<dyn TimeSource>,
    codes: PickupCodeGenerator,
}

impl LockerDb {
    pub fn new(config: LockerConfig, clock: Arc<dyn TimeSource>) -> Self {
        let codes = PickupCodeGenerator::new(config.pickup_code_length);
        Self {
            parcels: Table::new(),
            shelves: Table::new(),
            users: Table::new(),
            couriers: Table::new(),
            audit: Table::new(),
            config,
            clock,
            codes,
        }
    }

    pub fn with_code_generator(mut self, codes: PickupCodeGenerator) -> Self {
        self.codes = codes;
        self
    }

    pub fn parcels(&self) -> &Table<Parcel> {
        &self.parcels
    }

    pub fn shelves(&self) -> &Table<Shelf> {
        &self.shelves
    }

    pub fn users(&self) -> &Table<User> {
        &self.users
    }

    pub fn couriers(&self) -> &Table<Courier> {
        &self.couriers
    }

    pub fn audit_log(&self) -> &Table<AuditEntry> {
        &self.audit
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(super) fn next_pickup_code(&mut self) -> String {
        self.codes.next_code()
    }
}

impl StoreState for LockerDb {
    type Action = LockerAction;
    type ActionResult = LockerActionResult;
    type Query = LockerQuery;
    type QueryResult = LockerQueryResult;
    type Error = LockerError;

    fn apply(&mut self, action: LockerAction) -> Result<LockerActionResult, LockerError> {
        match action {
            LockerAction::Inbound(request) => self.inbound(request).map(LockerActionResult::Inbound),
            LockerAction::Pickup(request) => self.pickup(request).map(LockerActionResult::Pickup),
            LockerAction::SetStatus {
                tracking_number,
                status,
            } => self
                .set_status(&tracking_number, status)
                .map(LockerActionResult::SetStatus),
            LockerAction::CreateShelf(params) => {
                self.create_shelf(params).map(LockerActionResult::CreateShelf)
            }
            LockerAction::DeleteShelf { code } => {
                self.delete_shelf(&code).map(LockerActionResult::DeleteShelf)
            }
            LockerAction::SweepExpired { threshold_days } => self
                .sweep_expired(threshold_days)
                .map(LockerActionResult::SweepExpired),
            LockerAction::ResolveStudent { phone, name } => self
                .resolve_student(&phone, name.as_deref())
                .map(LockerActionResult::ResolveStudent),
            LockerAction::RegisterCourier(params) => self
                .register_courier(params)
                .map(LockerActionResult::RegisterCourier),
            LockerAction::RemoveCourier { code } => self
                .remove_courier(&code)
                .map(LockerActionResult::RemoveCourier),
        }
    }

    fn query(&self, query: LockerQuery) -> Result<LockerQueryResult, LockerError> {
        match query {
            LockerQuery::Parcel { tracking_number } => self
                .find_parcel(&tracking_number)
                .map(LockerQueryResult::Parcel),
            LockerQuery::MyParcels { user_id, page } => {
                Ok(LockerQueryResult::MyParcels(self.my_parcels(user_id, page)))
            }
            LockerQuery::RetentionParcels {
                threshold_days,
                page,
            } => Ok(LockerQueryResult::RetentionParcels(
                self.retention_parcels(threshold_days, page),
            )),
            LockerQuery::AuditEntries { parcel_id } => {
                Ok(LockerQueryResult::AuditEntries(self.audit_entries(parcel_id)))
            }
            LockerQuery::Shelf { code } => self.find_shelf(&code).map(LockerQueryResult::Shelf),
            LockerQuery::ListShelves { page } => {
                Ok(LockerQueryResult::ListShelves(self.list_shelves(page)))
            }
            LockerQuery::ShelfLoadReport => {
                Ok(LockerQueryResult::ShelfLoadReport(self.shelf_load_report()))
            }
            LockerQuery::ListCouriers { page } => {
                Ok(LockerQueryResult::ListCouriers(self.list_couriers(page)))
            }
            LockerQuery::CourierTasks { courier_code, page } => self
                .courier_tasks(&courier_code, page)
                .map(LockerQueryResult::CourierTasks),
            LockerQuery::Dashboard => Ok(LockerQueryResult::Dashboard(self.dashboard())),
            LockerQuery::User { user_id } => self.find_user(user_id).map(LockerQueryResult::User),
        }
    }

    fn begin(&mut self) {
        self.parcels.begin();
        self.shelves.begin();
        self.users.begin();
        self.couriers.begin();
        self.audit.begin();
    }

    fn commit(&mut self) {
        self.parcels.commit();
        self.shelves.commit();
        self.users.commit();
        self.couriers.commit();
        self.audit.commit();
    }

    fn rollback(&mut self) {
        self.parcels.rollback();
        self.shelves.rollback();
        self.users.rollback();
        self.couriers.rollback();
        self.audit.rollback();
    }
}
