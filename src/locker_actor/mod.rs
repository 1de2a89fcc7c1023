//! # Locker Actor
//!
//! The store actor that owns every locker table. All parcel, shelf, user,
//! courier and audit data lives in one [`LockerDb`] run by a
//! [`StoreActor`], so each operation below is a single serialized
//! transaction.
//!
//! ## Structure
//!
//! - [`db`] - [`LockerDb`], the [`StoreState`](store_actor::StoreState) implementation
//! - [`actions`] - [`LockerAction`] / [`LockerQuery`] and their result enums
//! - [`error`] - [`LockerError`]
//! - `lifecycle` - inbound, pickup, administrator status overwrite
//! - `allocator` - shelf creation, deletion and slot accounting
//! - `retention` - expiry sweep, retention list, audit log
//! - `accounts` - users and couriers
//! - `queries` - read models
//!
//! ## Usage
//!
//! ```rust
//! use parcel_locker::config::LockerConfig;
//! use parcel_locker::locker_actor;
//! use parcel_locker::clients::ShelfClient;
//! use parcel_locker::model::ShelfCreate;
//! use parcel_locker::time::SystemTimeSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, store) = locker_actor::new(&LockerConfig::default(), Arc::new(SystemTimeSource));
//!     tokio::spawn(actor.run());
//!
//!     let shelves = ShelfClient::new(store);
//!     let shelf = shelves
//!         .create_shelf(ShelfCreate { zone: "North".into(), code: "a1".into(), capacity: 40 })
//!         .await?;
//!     assert_eq!(shelf.code, "A1");
//!     Ok(())
//! }
//! ```

mod accounts;
pub mod actions;
mod allocator;
pub mod db;
pub mod error;
mod lifecycle;
mod queries;
mod retention;

pub use actions::*;
pub use db::{LockerDb, PickupCodeGenerator};
pub use error::*;

use crate::config::LockerConfig;
use crate::time::TimeSource;
use std::sync::Arc;
use store_actor::{StoreActor, StoreClient};

/// Creates the locker store actor and its client.
///
/// The client carries the configured request timeout.
pub fn new(
    config: &LockerConfig,
    clock: Arc<dyn TimeSource>,
) -> (StoreActor<LockerDb>, StoreClient<LockerDb>) {
    from_db(config, LockerDb::new(config.clone(), clock))
}

/// Like [`new`], around an already built [`LockerDb`].
pub fn from_db(
    config: &LockerConfig,
    db: LockerDb,
) -> (StoreActor<LockerDb>, StoreClient<LockerDb>) {
    let (actor, client) = StoreActor::new(config.channel_capacity, db);
    (actor, client.with_timeout(config.request_timeout))
}
