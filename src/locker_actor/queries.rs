//! Read models. Nothing here writes.

use super::db::LockerDb;
use super::error::LockerError;
use crate::model::{
    normalize_shelf_code, Courier, CourierTask, DashboardStats, LoadDiscrepancy, Page,
    PageRequest, Parcel, ParcelView, Shelf, User, UserId,
};
use std::cmp::Reverse;

impl LockerDb {
    /// The newest parcel with this tracking number.
    pub(super) fn find_parcel(&self, tracking_number: &str) -> Result<Parcel, LockerError> {
        let tracking_number = tracking_number.trim();
        self.parcels
            .latest_by_key(tracking_number)
            .cloned()
            .ok_or_else(|| LockerError::NotFound(format!("parcel {tracking_number}")))
    }

    pub(super) fn find_user(&self, user_id: UserId) -> Result<User, LockerError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| LockerError::NotFound(format!("user {user_id}")))
    }

    pub(super) fn find_shelf(&self, code: &str) -> Result<Shelf, LockerError> {
        let code = normalize_shelf_code(code);
        self.shelves
            .latest_by_key(&code)
            .cloned()
            .ok_or_else(|| LockerError::NotFound(format!("shelf {code}")))
    }

    /// A user's parcels, most recently updated first.
    pub(super) fn my_parcels(&self, user_id: UserId, page: PageRequest) -> Page<ParcelView> {
        let mut mine: Vec<&Parcel> = self
            .parcels
            .iter()
            .filter(|p| p.user_id == user_id)
            .collect();
        mine.sort_by_key(|p| Reverse((p.updated_at, p.id)));
        page.slice(mine.into_iter()).map(|p| self.parcel_view(p))
    }

    fn parcel_view(&self, parcel: &Parcel) -> ParcelView {
        ParcelView {
            tracking_number: parcel.tracking_number.clone(),
            courier_name: self.couriers.get(parcel.courier_id).map(|c| c.name.clone()),
            pickup_code: parcel
                .pickup_code
                .clone()
                .filter(|_| parcel.is_active()),
            shelf_zone: parcel
                .shelf_id
                .and_then(|id| self.shelves.get(id))
                .map(|s| s.zone.clone()),
            status: parcel.status,
            created_at: parcel.created_at,
            updated_at: parcel.updated_at,
        }
    }

    pub(super) fn list_shelves(&self, page: PageRequest) -> Page<Shelf> {
        page.slice(self.shelves.iter().cloned())
    }

    /// Shelves whose recorded load differs from their active parcel count.
    pub(super) fn shelf_load_report(&self) -> Vec<LoadDiscrepancy> {
        let counts = self.active_parcels_by_shelf();
        self.shelves
            .iter()
            .filter_map(|shelf| {
                let active = counts.get(&shelf.id).copied().unwrap_or(0);
                (active != shelf.current_load).then(|| LoadDiscrepancy {
                    shelf_code: shelf.code.clone(),
                    recorded_load: shelf.current_load,
                    active_parcels: active,
                })
            })
            .collect()
    }

    pub(super) fn list_couriers(&self, page: PageRequest) -> Page<Courier> {
        page.slice(self.couriers.iter().cloned())
    }

    /// Parcels delivered by a courier, newest first.
    pub(super) fn courier_tasks(
        &self,
        courier_code: &str,
        page: PageRequest,
    ) -> Result<Page<CourierTask>, LockerError> {
        let courier_code = courier_code.trim();
        let courier_id = self
            .couriers
            .latest_by_key(courier_code)
            .map(|c| c.id)
            .ok_or_else(|| LockerError::NotFound(format!("courier {courier_code}")))?;

        let mut delivered: Vec<&Parcel> = self
            .parcels
            .iter()
            .filter(|p| p.courier_id == courier_id)
            .collect();
        delivered.sort_by_key(|p| Reverse((p.created_at, p.id)));
        Ok(page.slice(delivered.into_iter()).map(|p| CourierTask {
            tracking_number: p.tracking_number.clone(),
            recipient_phone: self.users.get(p.user_id).map(|u| u.phone.clone()),
            status: p.status,
            created_at: p.created_at,
        }))
    }

    pub(super) fn dashboard(&self) -> DashboardStats {
        let today = self.now().date_naive();
        let waiting_pickup = self.parcels.iter().filter(|p| p.is_active()).count() as u64;
        let full_shelves = self.shelves.iter().filter(|s| s.is_full()).count() as u64;
        let inbounds = self
            .parcels
            .iter()
            .filter(|p| p.created_at.date_naive() == today)
            .count();
        let pickups = self
            .parcels
            .iter()
            .filter(|p| p.picked_up_at.is_some_and(|t| t.date_naive() == today))
            .count();
        DashboardStats {
            waiting_pickup,
            full_shelves,
            today_ops: (inbounds + pickups) as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{inbound, test_db};
    use super::*;
    use crate::model::{ParcelStatus, PickupRequest};
    use chrono::Duration;

    #[test]
    fn test_my_parcels_hides_code_once_inactive() {
        let (mut db, clock) = test_db(&[("A1", 5)]);
        let first = db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::minutes(5));
        db.inbound(inbound("SF2", "13800000001")).unwrap();
        clock.advance(Duration::minutes(5));
        db.pickup(PickupRequest {
            tracking_number: "SF1".into(),
            pickup_code: first.pickup_code.clone().unwrap(),
            user_id: first.user_id,
        })
        .unwrap();

        let page = db.my_parcels(first.user_id, PageRequest::default());

        assert_eq!(page.total, 2);
        let picked = &page.items[0];
        assert_eq!(picked.tracking_number, "SF1");
        assert_eq!(picked.pickup_code, None);
        assert_eq!(picked.shelf_zone, None);
        let waiting = &page.items[1];
        assert!(waiting.pickup_code.is_some());
        assert_eq!(waiting.shelf_zone.as_deref(), Some("Zone-A1"));
        assert_eq!(waiting.courier_name.as_deref(), Some("SF Express"));
    }

    #[test]
    fn test_load_report_surfaces_admin_drift() {
        let (mut db, _clock) = test_db(&[("A1", 5), ("A2", 5)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        assert!(db.shelf_load_report().is_empty());

        db.set_status("SF1", ParcelStatus::Returned).unwrap();

        assert_eq!(
            db.shelf_load_report(),
            vec![LoadDiscrepancy {
                shelf_code: "A1".into(),
                recorded_load: 1,
                active_parcels: 0,
            }]
        );
    }

    #[test]
    fn test_courier_tasks_newest_first() {
        let (mut db, clock) = test_db(&[("A1", 5)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::minutes(1));
        db.inbound(inbound("SF2", "13800000002")).unwrap();

        let tasks = db.courier_tasks("SFX", PageRequest::default()).unwrap();

        assert_eq!(tasks.items[0].tracking_number, "SF2");
        assert_eq!(tasks.items[0].recipient_phone.as_deref(), Some("13800000002"));
        assert!(matches!(
            db.courier_tasks("NOPE", PageRequest::default()),
            Err(LockerError::NotFound(_))
        ));
    }

    #[test]
    fn test_dashboard_counts_today_only() {
        let (mut db, clock) = test_db(&[("A1", 1), ("A2", 5)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::days(1));
        let parcel = db.inbound(inbound("SF2", "13800000002")).unwrap();
        db.pickup(PickupRequest {
            tracking_number: "SF2".into(),
            pickup_code: parcel.pickup_code.unwrap(),
            user_id: parcel.user_id,
        })
        .unwrap();

        let stats = db.dashboard();

        assert_eq!(stats.waiting_pickup, 1);
        assert_eq!(stats.full_shelves, 1);
        assert_eq!(stats.today_ops, 2);
    }

    #[test]
    fn test_find_shelf_normalizes_code() {
        let (db, _clock) = test_db(&[("A1", 5)]);
        assert_eq!(db.find_shelf(" a1 ").unwrap().code, "A1");
        assert!(matches!(db.find_shelf("Z9"), Err(LockerError::NotFound(_))));
    }
}
