//! # Courier Client
use crate::locker_actor::{
    LockerAction, LockerActionResult, LockerDb, LockerError, LockerQuery, LockerQueryResult,
};
use crate::model::{Courier, CourierCreate, CourierTask, Page, PageRequest};
use async_trait::async_trait;
use store_actor::{ActorClient, StoreClient, StoreError};
use tracing::instrument;

/// Client for courier registration and task lists.
#[derive(Clone)]
pub struct CourierClient {
    inner: StoreClient<LockerDb>,
}

impl CourierClient {
    pub fn new(inner: StoreClient<LockerDb>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<LockerDb> for CourierClient {
    type Error = LockerError;

    fn inner(&self) -> &StoreClient<LockerDb> {
        &self.inner
    }

    fn map_error(e: StoreError<LockerError>) -> Self::Error {
        LockerError::from(e)
    }
}

impl CourierClient {
    #[instrument(skip(self))]
    pub async fn register(&self, params: CourierCreate) -> Result<Courier, LockerError> {
        match self.apply(LockerAction::RegisterCourier(params)).await? {
            LockerActionResult::RegisterCourier(courier) => Ok(courier),
            _ => unreachable!("RegisterCourier action must return RegisterCourier result"),
        }
    }

    /// Removes a courier. Refused with `CourierInUse` once any parcel names it.
    #[instrument(skip(self))]
    pub async fn remove(&self, code: &str) -> Result<Courier, LockerError> {
        let action = LockerAction::RemoveCourier {
            code: code.to_string(),
        };
        match self.apply(action).await? {
            LockerActionResult::RemoveCourier(courier) => Ok(courier),
            _ => unreachable!("RemoveCourier action must return RemoveCourier result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> Result<Page<Courier>, LockerError> {
        match self.query(LockerQuery::ListCouriers { page }).await? {
            LockerQueryResult::ListCouriers(couriers) => Ok(couriers),
            _ => unreachable!("ListCouriers query must return ListCouriers result"),
        }
    }

    /// Parcels the courier delivered, newest first.
    #[instrument(skip(self))]
    pub async fn tasks(
        &self,
        courier_code: &str,
        page: PageRequest,
    ) -> Result<Page<CourierTask>, LockerError> {
        let query = LockerQuery::CourierTasks {
            courier_code: courier_code.to_string(),
            page,
        };
        match self.query(query).await? {
            LockerQueryResult::CourierTasks(tasks) => Ok(tasks),
            _ => unreachable!("CourierTasks query must return CourierTasks result"),
        }
    }
}
