//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and shutting down the locker.
//!
//! ## The LockerSystem Pattern
//!
//! The locker has a single store actor, so wiring is simple: create the actor,
//! spawn it, and clone its client into each domain client.
//!
//! ```rust,ignore
//! let (actor, store) = locker_actor::new(&config, clock);
//! let handle = tokio::spawn(actor.run());
//!
//! let parcels = ParcelClient::new(store.clone());
//! let shelves = ShelfClient::new(store.clone());
//! // ...
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` once the
//!    queue is drained
//! 3. **Await completion** - the task yields the final [`LockerDb`](crate::locker_actor::LockerDb)
//!
//! No request that was accepted into the queue is lost.
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter.
//! `RUST_LOG` takes precedence over the configured filter:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Transactions and lifecycle events
//! RUST_LOG=debug cargo run     # Every request the store receives
//! ```

pub mod locker_system;

pub use locker_system::*;
pub use store_actor::tracing::setup_tracing;
