//! # Shelf Client
//!
//! Shelf administration and the load reconciliation report.
use crate::locker_actor::{
    LockerAction, LockerActionResult, LockerDb, LockerError, LockerQuery, LockerQueryResult,
};
use crate::model::{LoadDiscrepancy, Page, PageRequest, Shelf, ShelfCreate};
use async_trait::async_trait;
use store_actor::{ActorClient, StoreClient, StoreError};
use tracing::instrument;

/// Client for shelf operations.
#[derive(Clone)]
pub struct ShelfClient {
    inner: StoreClient<LockerDb>,
}

impl ShelfClient {
    pub fn new(inner: StoreClient<LockerDb>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<LockerDb> for ShelfClient {
    type Error = LockerError;

    fn inner(&self) -> &StoreClient<LockerDb> {
        &self.inner
    }

    fn map_error(e: StoreError<LockerError>) -> Self::Error {
        LockerError::from(e)
    }
}

impl ShelfClient {
    /// Creates a shelf. The code is trimmed and upper-cased; capacity must be
    /// within `1..=10000`.
    #[instrument(skip(self))]
    pub async fn create_shelf(&self, params: ShelfCreate) -> Result<Shelf, LockerError> {
        match self.apply(LockerAction::CreateShelf(params)).await? {
            LockerActionResult::CreateShelf(shelf) => Ok(shelf),
            _ => unreachable!("CreateShelf action must return CreateShelf result"),
        }
    }

    /// Deletes a shelf that holds no active parcels.
    #[instrument(skip(self))]
    pub async fn delete_shelf(&self, code: &str) -> Result<Shelf, LockerError> {
        let action = LockerAction::DeleteShelf {
            code: code.to_string(),
        };
        match self.apply(action).await? {
            LockerActionResult::DeleteShelf(shelf) => Ok(shelf),
            _ => unreachable!("DeleteShelf action must return DeleteShelf result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_shelf(&self, code: &str) -> Result<Shelf, LockerError> {
        let query = LockerQuery::Shelf {
            code: code.to_string(),
        };
        match self.query(query).await? {
            LockerQueryResult::Shelf(shelf) => Ok(shelf),
            _ => unreachable!("Shelf query must return Shelf result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_shelves(&self, page: PageRequest) -> Result<Page<Shelf>, LockerError> {
        match self.query(LockerQuery::ListShelves { page }).await? {
            LockerQueryResult::ListShelves(shelves) => Ok(shelves),
            _ => unreachable!("ListShelves query must return ListShelves result"),
        }
    }

    /// Shelves whose recorded load disagrees with their active parcels.
    /// Empty unless an administrator overwrite caused drift.
    #[instrument(skip(self))]
    pub async fn load_report(&self) -> Result<Vec<LoadDiscrepancy>, LockerError> {
        match self.query(LockerQuery::ShelfLoadReport).await? {
            LockerQueryResult::ShelfLoadReport(report) => Ok(report),
            _ => unreachable!("ShelfLoadReport query must return ShelfLoadReport result"),
        }
    }
}
