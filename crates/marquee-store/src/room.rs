//! Seat availability for one (movie, theater) pair.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use marquee_core::{SeatId, EOL, SEATS_PER_ROOM};

use crate::error::{Result, StoreError};

/// Outcome of a booking attempt.
///
/// Booking outcomes are data, not errors: a rejected booking leaves the
/// room untouched and the caller decides how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingResult {
    /// Every requested seat was available and is now booked.
    Accepted,
    /// At least one requested seat is already booked. Nothing was changed.
    NotAvailable,
    /// At least one requested seat index is out of range. Nothing was
    /// changed. `Invalid` dominates `NotAvailable`.
    Invalid,
}

impl BookingResult {
    /// Returns true if the booking was accepted.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Converts a lock poison error to a store error.
fn poison_err<T>(_: PoisonError<T>) -> StoreError {
    StoreError::internal("room lock poisoned")
}

#[derive(Debug)]
struct RoomInner {
    available: [bool; SEATS_PER_ROOM],
    listing: Arc<str>,
}

impl RoomInner {
    fn rebuild_listing(&mut self) {
        let mut listing = String::new();
        let mut first = true;
        for (index, available) in self.available.iter().enumerate() {
            if *available {
                if first {
                    first = false;
                } else {
                    listing.push(',');
                }
                let _ = write!(listing, "{index}");
            }
        }
        listing.push_str(EOL);
        self.listing = Arc::from(listing);
    }
}

/// The booking state for one (movie, theater) pair.
///
/// A room holds [`SEATS_PER_ROOM`] seats, all available at creation, and a
/// cached rendered listing of the indices still available. The room
/// carries its own reader/writer lock so bookings against different rooms
/// never contend: [`available_listing`] takes the read side, [`book`]
/// takes the write side.
///
/// Seats are monotone: a booked seat is never freed. Rooms live until the
/// owning store is cleared.
///
/// [`available_listing`]: Room::available_listing
/// [`book`]: Room::book
#[derive(Debug)]
pub struct Room {
    inner: RwLock<RoomInner>,
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

impl Room {
    /// Creates a room with every seat available.
    #[must_use]
    pub fn new() -> Self {
        let mut inner = RoomInner {
            available: [true; SEATS_PER_ROOM],
            listing: Arc::from(""),
        };
        inner.rebuild_listing();
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Returns the cached listing of available seats.
    ///
    /// A single line of comma-separated ascending indices terminated by
    /// CRLF; a fully-booked room renders as CRLF alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the room lock is poisoned.
    pub fn available_listing(&self) -> Result<Arc<str>> {
        let inner = self.inner.read().map_err(poison_err)?;
        Ok(Arc::clone(&inner.listing))
    }

    /// Books a set of seats atomically.
    ///
    /// The request is evaluated in two passes under the write lock: first
    /// every index is validated (out-of-range beats already-booked, so a
    /// request mixing both faults reports [`BookingResult::Invalid`]),
    /// then, only if the whole set is bookable, every seat is flipped and
    /// the cache rebuilt. On any rejection the room is untouched.
    ///
    /// An empty set is trivially accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the room lock is poisoned.
    pub fn book(&self, seats: &HashSet<SeatId>) -> Result<BookingResult> {
        if seats.is_empty() {
            return Ok(BookingResult::Accepted);
        }

        let mut inner = self.inner.write().map_err(poison_err)?;

        for seat in seats {
            if seat.index() >= SEATS_PER_ROOM {
                return Ok(BookingResult::Invalid);
            }
        }
        for seat in seats {
            if !inner.available[seat.index()] {
                return Ok(BookingResult::NotAvailable);
            }
        }

        for seat in seats {
            inner.available[seat.index()] = false;
        }
        inner.rebuild_listing();

        Ok(BookingResult::Accepted)
    }
}
