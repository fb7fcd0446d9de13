//! # marquee-store
//!
//! The concurrent in-memory booking store at the heart of Marquee.
//!
//! The store is composed of three cooperating pieces:
//!
//! - [`NameTable`]: an append-only bijection between a unique name and a
//!   monotonically allocated numeric id, with a cached rendered listing
//! - [`Room`]: a fixed-size seat bitmap guarded by its own reader/writer
//!   lock, with a cached listing of the seats still available
//! - [`BookingStore`]: the aggregate that owns two name tables (movies and
//!   theaters), the `movie → theater → Room` map, and a per-movie cache of
//!   rendered theater listings
//!
//! ## Concurrency
//!
//! All store operations are thread-safe. Reads run concurrently with each
//! other and with bookings; structural mutations (adding movies or
//! theaters, assigning theaters to a movie, clearing) are exclusive.
//! Bookings targeting different rooms run in parallel; bookings targeting
//! the same room serialise on that room's write lock. See
//! [`BookingStore::book`] for the two-level locking discipline that makes
//! this work.
//!
//! ## Rendered listings
//!
//! Every read path returns a shared immutable snapshot (`Arc<str>`) of a
//! cache that mutators rebuild in place. Readers never copy a listing; a
//! snapshot handed out stays valid even if the store replaces its cached
//! pointer afterwards.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod name_table;
pub mod room;
pub mod store;

pub use error::{Result, StoreError};
pub use name_table::NameTable;
pub use room::{BookingResult, Room};
pub use store::BookingStore;
