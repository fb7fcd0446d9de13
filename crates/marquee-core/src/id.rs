//! Strongly-typed identifiers for Marquee entities.
//!
//! All identifiers are:
//! - **Strongly typed**: Prevents mixing up different id types at compile time
//! - **Plain integers on the wire**: Rendered and parsed as decimal digits
//! - **Allocated by the store**: Movie and theater ids come from the name
//!   tables' monotonic counters, starting at 1; id 0 is never issued
//!
//! # Example
//!
//! ```rust
//! use marquee_core::id::{MovieId, TheaterId};
//!
//! let movie = MovieId::new(1);
//! let theater: TheaterId = "7".parse().unwrap();
//!
//! // Ids are different types - this won't compile:
//! // let wrong: MovieId = theater;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when an identifier cannot be parsed from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {message}")]
pub struct IdParseError {
    /// Description of what made the id invalid.
    pub message: String,
}

/// Parses a strict run of ASCII digits into a `u64`.
///
/// Unlike `u64::from_str`, this rejects sign prefixes, so the accepted
/// forms match the wire grammar exactly. Overflow is a parse failure.
fn parse_decimal(s: &str) -> Result<u64, IdParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdParseError {
            message: format!("expected decimal digits, got '{s}'"),
        });
    }
    s.parse::<u64>().map_err(|_| IdParseError {
        message: format!("value out of range: '{s}'"),
    })
}

/// A unique identifier for a movie in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(u64);

impl MovieId {
    /// Creates a movie id from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Self)
    }
}

/// A unique identifier for a theater in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheaterId(u64);

impl TheaterId {
    /// Creates a theater id from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TheaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TheaterId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Self)
    }
}

/// A seat index within a room.
///
/// Valid seats are `0..SEATS_PER_ROOM`; the store reports out-of-range
/// indices as an invalid booking rather than rejecting them at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(usize);

impl SeatId {
    /// Creates a seat id from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SeatId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)?;
        usize::try_from(value).map(Self).map_err(|_| IdParseError {
            message: format!("value out of range: '{s}'"),
        })
    }
}
