//! # Audit Client
//!
//! Retention sweeps and the audit log. The sweep is not scheduled here; a
//! caller (cron job, admin action) triggers it, and running it again or
//! concurrently is harmless.
use crate::locker_actor::{
    LockerAction, LockerActionResult, LockerDb, LockerError, LockerQuery, LockerQueryResult,
};
use crate::model::{AuditEntry, Page, PageRequest, Parcel, ParcelId};
use async_trait::async_trait;
use store_actor::{ActorClient, StoreClient, StoreError};
use tracing::{info, instrument};

/// Client for retention auditing.
#[derive(Clone)]
pub struct AuditClient {
    inner: StoreClient<LockerDb>,
}

impl AuditClient {
    pub fn new(inner: StoreClient<LockerDb>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<LockerDb> for AuditClient {
    type Error = LockerError;

    fn inner(&self) -> &StoreClient<LockerDb> {
        &self.inner
    }

    fn map_error(e: StoreError<LockerError>) -> Self::Error {
        LockerError::from(e)
    }
}

impl AuditClient {
    /// Flags active parcels older than `threshold_days` (0: configured
    /// default). Returns how many were newly flagged.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self, threshold_days: u32) -> Result<u64, LockerError> {
        match self.apply(LockerAction::SweepExpired { threshold_days }).await? {
            LockerActionResult::SweepExpired(flagged) => {
                info!(flagged, "Sweep finished");
                Ok(flagged)
            }
            _ => unreachable!("SweepExpired action must return SweepExpired result"),
        }
    }

    /// Active parcels older than `threshold_days` (0: configured default),
    /// oldest first.
    #[instrument(skip(self))]
    pub async fn retention_parcels(
        &self,
        threshold_days: u32,
        page: PageRequest,
    ) -> Result<Page<Parcel>, LockerError> {
        let query = LockerQuery::RetentionParcels {
            threshold_days,
            page,
        };
        match self.query(query).await? {
            LockerQueryResult::RetentionParcels(parcels) => Ok(parcels),
            _ => unreachable!("RetentionParcels query must return RetentionParcels result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn entries(&self, parcel_id: Option<ParcelId>) -> Result<Vec<AuditEntry>, LockerError> {
        match self.query(LockerQuery::AuditEntries { parcel_id }).await? {
            LockerQueryResult::AuditEntries(entries) => Ok(entries),
            _ => unreachable!("AuditEntries query must return AuditEntries result"),
        }
    }
}
