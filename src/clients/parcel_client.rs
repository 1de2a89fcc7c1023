//! # Parcel Client
//!
//! Provides a high‑level API for the parcel lifecycle: inbound, pickup and
//! the administrator status overwrite, plus the student-facing views.
use crate::locker_actor::{
    LockerAction, LockerActionResult, LockerDb, LockerError, LockerQuery, LockerQueryResult,
};
use crate::model::{
    DashboardStats, InboundRequest, Page, PageRequest, Parcel, ParcelStatus, ParcelView,
    PickupRequest, UserId,
};
use async_trait::async_trait;
use store_actor::{ActorClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for parcel operations.
#[derive(Clone)]
pub struct ParcelClient {
    inner: StoreClient<LockerDb>,
}

impl ParcelClient {
    pub fn new(inner: StoreClient<LockerDb>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<LockerDb> for ParcelClient {
    type Error = LockerError;

    fn inner(&self) -> &StoreClient<LockerDb> {
        &self.inner
    }

    fn map_error(e: StoreError<LockerError>) -> Self::Error {
        LockerError::from(e)
    }
}

impl ParcelClient {
    /// Books a parcel onto the first shelf with a free slot.
    ///
    /// Fails with `DuplicateTracking` while another parcel with the same
    /// tracking number is still waiting, and with `NoCapacity` when every
    /// shelf is full. Nothing is written on failure.
    #[instrument(skip(self))]
    pub async fn inbound(&self, request: InboundRequest) -> Result<Parcel, LockerError> {
        debug!("Sending inbound");
        match self.apply(LockerAction::Inbound(request)).await? {
            LockerActionResult::Inbound(parcel) => Ok(parcel),
            _ => unreachable!("Inbound action must return Inbound result"),
        }
    }

    /// Hands a stored parcel to its owner. Every mismatch is reported as
    /// `PickupRejected`.
    #[instrument(skip(self, request), fields(tracking_number = %request.tracking_number))]
    pub async fn pickup(&self, request: PickupRequest) -> Result<Parcel, LockerError> {
        debug!("Sending pickup");
        match self.apply(LockerAction::Pickup(request)).await? {
            LockerActionResult::Pickup(parcel) => Ok(parcel),
            _ => unreachable!("Pickup action must return Pickup result"),
        }
    }

    /// Overwrites a parcel's status. `status` must name one of pending,
    /// stored, exception or returned; anything else is refused before the
    /// store is contacted.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        tracking_number: &str,
        status: &str,
    ) -> Result<Parcel, LockerError> {
        let status: ParcelStatus = status.parse()?;
        if !status.is_admin_settable() {
            return Err(LockerError::InvalidStatus(status.to_string()));
        }
        debug!(%status, "Sending status overwrite");
        let action = LockerAction::SetStatus {
            tracking_number: tracking_number.to_string(),
            status,
        };
        match self.apply(action).await? {
            LockerActionResult::SetStatus(parcel) => Ok(parcel),
            _ => unreachable!("SetStatus action must return SetStatus result"),
        }
    }

    /// The newest parcel with this tracking number.
    #[instrument(skip(self))]
    pub async fn get_parcel(&self, tracking_number: &str) -> Result<Parcel, LockerError> {
        let query = LockerQuery::Parcel {
            tracking_number: tracking_number.to_string(),
        };
        match self.query(query).await? {
            LockerQueryResult::Parcel(parcel) => Ok(parcel),
            _ => unreachable!("Parcel query must return Parcel result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn my_parcels(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ParcelView>, LockerError> {
        match self.query(LockerQuery::MyParcels { user_id, page }).await? {
            LockerQueryResult::MyParcels(views) => Ok(views),
            _ => unreachable!("MyParcels query must return MyParcels result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, LockerError> {
        match self.query(LockerQuery::Dashboard).await? {
            LockerQueryResult::Dashboard(stats) => Ok(stats),
            _ => unreachable!("Dashboard query must return Dashboard result"),
        }
    }
}
