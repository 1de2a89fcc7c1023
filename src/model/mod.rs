//! # Domain Model
//!
//! Plain data structures stored by the locker and the read-only views built
//! from them. Every stored type implements [`Record`](store_actor::Record) so
//! it can live in a journaled [`Table`](store_actor::Table); the natural key
//! each one indexes is documented on its `Record` impl.

/// Declares a type-safe `u64` identifier with the traits a table id needs.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod audit;
pub mod courier;
pub mod page;
pub mod parcel;
pub mod shelf;
pub mod user;
pub mod views;

pub use audit::*;
pub use courier::*;
pub use page::*;
pub use parcel::*;
pub use shelf::*;
pub use user::*;
pub use views::*;
