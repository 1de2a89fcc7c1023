//! Type-safe wrappers around the locker's [`StoreClient`](store_actor::StoreClient).
//!
//! Every client holds a clone of the same store client, so they all talk to
//! one store actor and share its ordering.

pub mod audit_client;
pub mod courier_client;
pub mod parcel_client;
pub mod shelf_client;
pub mod user_client;

pub use audit_client::*;
pub use courier_client::*;
pub use parcel_client::*;
pub use shelf_client::*;
pub use user_client::*;
