//! # Parcel Locker
//!
//! The parcel lifecycle and shelf-capacity engine of a campus parcel locker.
//! Couriers book parcels onto shelf slots, students collect them with a
//! pickup code, and administrators watch retention and correct stuck parcels.
//!
//! ## Core Components
//!
//! - **[locker_actor]**: the store actor owning every table; inbound, pickup,
//!   status overwrite, shelf accounting, retention sweeps and read models.
//! - **[model]**: plain data ([`Parcel`](model::Parcel), [`Shelf`](model::Shelf), ...)
//!   and the views built from it.
//! - **[clients]**: type-safe wrappers (e.g. [`ParcelClient`](clients::ParcelClient))
//!   that hide the message passing.
//! - **[lifecycle]**: [`LockerSystem`](lifecycle::LockerSystem), which starts and
//!   stops the whole thing.
//! - **[config]** and **[time]**: tunables and the injectable clock.
//!
//! ## Guarantees
//!
//! - A shelf's `current_load` equals its number of active parcels, and never
//!   leaves `0..=capacity`.
//! - Of any number of simultaneous pickups of one parcel, exactly one wins.
//! - A failed operation leaves no partial writes behind.
//!
//! ## Testing
//!
//! See [`store_actor::mock`] for utilities to test clients without spawning
//! the store actor.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod locker_actor;
pub mod model;
pub mod time;
