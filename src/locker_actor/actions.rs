//! Requests understood by the locker store.
//!
//! Mutating operations are [`LockerAction`]s and run as one transaction each;
//! reads are [`LockerQuery`]s. Result enums match their request enums 1:1.

use crate::model::{
    AuditEntry, Courier, CourierCreate, CourierTask, DashboardStats, InboundRequest,
    LoadDiscrepancy, Page, PageRequest, Parcel, ParcelId, ParcelStatus, ParcelView,
    PickupRequest, Shelf, ShelfCreate, User, UserId,
};

/// State-changing operations.
#[derive(Debug, Clone)]
pub enum LockerAction {
    /// Books a parcel onto the first shelf with room.
    Inbound(InboundRequest),
    /// Hands a stored parcel to its owner.
    Pickup(PickupRequest),
    /// Administrator overwrite of the newest parcel with this tracking number.
    SetStatus {
        tracking_number: String,
        status: ParcelStatus,
    },
    CreateShelf(ShelfCreate),
    DeleteShelf {
        code: String,
    },
    /// Writes an `EXPIRED` audit entry for each overdue active parcel.
    /// `0` means the configured default.
    SweepExpired {
        threshold_days: u32,
    },
    /// Finds the user with this phone, creating it if needed.
    ResolveStudent {
        phone: String,
        name: Option<String>,
    },
    RegisterCourier(CourierCreate),
    RemoveCourier {
        code: String,
    },
}

/// Results from LockerActions - variants match 1:1 with LockerAction
#[derive(Debug, Clone)]
pub enum LockerActionResult {
    Inbound(Parcel),
    Pickup(Parcel),
    SetStatus(Parcel),
    CreateShelf(Shelf),
    DeleteShelf(Shelf),
    /// Number of newly written audit entries.
    SweepExpired(u64),
    ResolveStudent(User),
    RegisterCourier(Courier),
    RemoveCourier(Courier),
}

/// Read-only operations.
#[derive(Debug, Clone)]
pub enum LockerQuery {
    Parcel {
        tracking_number: String,
    },
    MyParcels {
        user_id: UserId,
        page: PageRequest,
    },
    /// Active parcels older than the threshold. `0` means the configured
    /// default.
    RetentionParcels {
        threshold_days: u32,
        page: PageRequest,
    },
    AuditEntries {
        parcel_id: Option<ParcelId>,
    },
    Shelf {
        code: String,
    },
    ListShelves {
        page: PageRequest,
    },
    ShelfLoadReport,
    ListCouriers {
        page: PageRequest,
    },
    CourierTasks {
        courier_code: String,
        page: PageRequest,
    },
    Dashboard,
    User {
        user_id: UserId,
    },
}

/// Results from LockerQueries - variants match 1:1 with LockerQuery
#[derive(Debug, Clone)]
pub enum LockerQueryResult {
    Parcel(Parcel),
    MyParcels(Page<ParcelView>),
    RetentionParcels(Page<Parcel>),
    AuditEntries(Vec<AuditEntry>),
    Shelf(Shelf),
    ListShelves(Page<Shelf>),
    ShelfLoadReport(Vec<LoadDiscrepancy>),
    ListCouriers(Page<Courier>),
    CourierTasks(Page<CourierTask>),
    Dashboard(DashboardStats),
    User(User),
}
