use crate::clients::{AuditClient, CourierClient, ParcelClient, ShelfClient, UserClient};
use crate::config::LockerConfig;
use crate::locker_actor::{self, LockerDb};
use crate::time::{SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the parcel locker.
///
/// `LockerSystem` is responsible for:
/// - **Lifecycle Management**: starting the store actor and stopping it
/// - **Dependency Wiring**: handing one store client to every domain client
///
/// # Example
///
/// ```ignore
/// let system = LockerSystem::new(LockerConfig::from_env());
///
/// let shelf = system.shelves.create_shelf(params).await?;
/// let parcel = system.parcels.inbound(request).await?;
///
/// // Gracefully shut down when done
/// let db = system.shutdown().await?;
/// ```
pub struct LockerSystem {
    /// Inbound, pickup, status overwrite, student views, dashboard
    pub parcels: ParcelClient,

    /// Shelf administration and load report
    pub shelves: ShelfClient,

    /// Courier registration and task lists
    pub couriers: CourierClient,

    /// Expiry sweep, retention list, audit log
    pub audit: AuditClient,

    /// Student accounts
    pub users: UserClient,

    /// The store actor's task; yields the final state on shutdown
    handle: tokio::task::JoinHandle<LockerDb>,
}

impl LockerSystem {
    /// Starts a locker on the wall clock. Must be called inside a Tokio
    /// runtime.
    pub fn new(config: LockerConfig) -> Self {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Starts a locker that reads time from `clock`.
    pub fn with_time_source(config: LockerConfig, clock: Arc<dyn TimeSource>) -> Self {
        Self::with_db(&config, LockerDb::new(config.clone(), clock))
    }

    /// Starts a locker around a prepared database.
    pub fn with_db(config: &LockerConfig, db: LockerDb) -> Self {
        let (actor, store) = locker_actor::from_db(config, db);
        let handle = tokio::spawn(actor.run());
        info!(
            channel_capacity = config.channel_capacity,
            timeout_ms = config.request_timeout.as_millis() as u64,
            "Locker system started"
        );

        Self {
            parcels: ParcelClient::new(store.clone()),
            shelves: ShelfClient::new(store.clone()),
            couriers: CourierClient::new(store.clone()),
            audit: AuditClient::new(store.clone()),
            users: UserClient::new(store),
            handle,
        }
    }

    /// Gracefully shuts down the store actor and returns its final state.
    ///
    /// Dropping the clients closes the request channel; the actor finishes
    /// whatever is already queued and exits. Clones of the clients made
    /// elsewhere keep the channel open, so drop them first.
    pub async fn shutdown(self) -> Result<LockerDb, String> {
        info!("Shutting down locker system...");

        drop(self.parcels);
        drop(self.shelves);
        drop(self.couriers);
        drop(self.audit);
        drop(self.users);

        match self.handle.await {
            Ok(db) => {
                info!("Locker system shutdown complete.");
                Ok(db)
            }
            Err(e) => {
                error!("Store actor task failed: {:?}", e);
                Err(format!("Store actor task failed: {:?}", e))
            }
        }
    }
}
