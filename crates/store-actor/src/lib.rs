//! # Store Actor
//!
//! This crate provides a small runtime for owning a piece of mutable state in
//! a single Tokio task and talking to it through typed messages. It follows
//! the **Actor Model** and adds one thing the plain pattern lacks:
//! **transactions**. Every mutating request is applied all-or-nothing.
//!
//! ## Why an Actor around the whole State?
//!
//! Business operations often touch several collections at once: a parcel row,
//! the shelf it sits on, an audit entry. Splitting those collections across
//! actors would force cross-actor coordination and make atomicity a
//! distributed problem. Owning them together in one actor gives:
//!
//! - **Serializable isolation**: requests are processed one at a time, so no
//!   two operations ever interleave
//! - **Atomicity**: each action runs between `begin` and `commit`/`rollback`
//! - **No locks**: the state is never shared, only messaged
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`StoreState`], [`Table`]) - your data and business rules
//! 2. **Runtime Layer** ([`StoreActor`]) - sequential processing and transactions
//! 3. **Interface Layer** ([`StoreClient`], [`ActorClient`]) - type-safe requests
//!
//! ## Quick Start
//!
//! ```rust
//! use store_actor::{Record, StoreActor, StoreState, Table};
//!
//! #[derive(Debug, Clone)]
//! struct Note { id: u64, topic: String }
//!
//! impl Record for Note {
//!     type Id = u64;
//!     fn id(&self) -> u64 { self.id }
//!     fn key(&self) -> String { self.topic.clone() }
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("topic must not be empty")]
//! struct EmptyTopic;
//!
//! #[derive(Default)]
//! struct Notes { notes: Table<Note> }
//!
//! impl StoreState for Notes {
//!     type Action = String;
//!     type ActionResult = u64;
//!     type Query = String;
//!     type QueryResult = usize;
//!     type Error = EmptyTopic;
//!
//!     fn apply(&mut self, topic: String) -> Result<u64, EmptyTopic> {
//!         // Written first, validated second: the rollback undoes the insert.
//!         let id = self.notes.insert_with(|id| Note { id, topic: topic.clone() }).id;
//!         if topic.is_empty() { return Err(EmptyTopic); }
//!         Ok(id)
//!     }
//!
//!     fn query(&self, topic: String) -> Result<usize, EmptyTopic> {
//!         Ok(self.notes.by_key(&topic).count())
//!     }
//!
//!     fn begin(&mut self) { self.notes.begin() }
//!     fn commit(&mut self) { self.notes.commit() }
//!     fn rollback(&mut self) { self.notes.rollback() }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(10, Notes::default());
//!     let handle = tokio::spawn(actor.run());
//!
//!     client.apply("rust".into()).await.unwrap();
//!     assert!(client.apply(String::new()).await.is_err());
//!     assert_eq!(client.query(String::new()).await.unwrap(), 0);
//!
//!     drop(client);
//!     let notes = handle.await.unwrap();
//!     assert_eq!(notes.notes.len(), 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The actor runs in its own Tokio task
//! - Requests are processed **sequentially** (no locks needed)
//! - Any number of cloned clients may send concurrently; the channel orders them
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that answers requests from a
//! script instead of a running actor, for fast deterministic tests of client
//! wrappers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod table;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::ActorClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use state::StoreState;
pub use table::{Record, Table};
