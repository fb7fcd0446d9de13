//! # marquee-core
//!
//! Shared primitives for the Marquee cinema seat-booking service.
//!
//! This crate provides the foundational types used across all Marquee
//! components:
//!
//! - **Identifiers**: Strongly-typed ids for movies, theaters and seats
//! - **Wire constants**: The CRLF line terminator and the room size
//! - **Observability**: Logging initialization helpers
//!
//! ## Crate Boundary
//!
//! `marquee-core` is the only crate allowed to define shared primitives.
//! The booking store and the HTTP layer both build on the types defined
//! here and never redefine them.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod id;
pub mod observability;

pub use id::{IdParseError, MovieId, SeatId, TheaterId};
pub use observability::{init_logging, LogFormat};

/// End-of-line sequence terminating every line of every rendered listing.
pub const EOL: &str = "\r\n";

/// Number of seats in every room.
///
/// Every (movie, theater) pair materialises a room with exactly this many
/// seats, indexed `0..SEATS_PER_ROOM`.
pub const SEATS_PER_ROOM: usize = 20;
