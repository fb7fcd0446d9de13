//! Error types for booking-store operations.

use marquee_core::{MovieId, TheaterId};
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// Booking business outcomes (seat taken, seat out of range) are not
/// errors; they are reported through [`crate::BookingResult`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A name in a bulk add already exists in the table.
    #[error("{entity} already exists: {name}")]
    DuplicateName {
        /// The kind of entity the table holds (`"movie"` or `"theater"`).
        entity: &'static str,
        /// The offending name.
        name: String,
    },

    /// An id lookup on a name table found nothing.
    #[error("unknown {entity} id: {id}")]
    UnknownId {
        /// The kind of entity the table holds.
        entity: &'static str,
        /// The id that was looked up.
        id: u64,
    },

    /// A movie id refers to no known movie.
    #[error("unknown movie: {movie_id}")]
    UnknownMovie {
        /// The id that was looked up.
        movie_id: MovieId,
    },

    /// A theater id refers to no known theater.
    #[error("unknown theater: {theater_id}")]
    UnknownTheater {
        /// The id that was looked up.
        theater_id: TheaterId,
    },

    /// No room exists for the given (movie, theater) pair.
    #[error("no room for movie {movie_id} in theater {theater_id}")]
    UnknownRoom {
        /// The movie side of the pair.
        movie_id: MovieId,
        /// The theater side of the pair.
        theater_id: TheaterId,
    },

    /// A theater is already assigned to the movie.
    #[error("theater {theater_id} is already assigned to movie {movie_id}")]
    AlreadyAssigned {
        /// The movie the assignment targeted.
        movie_id: MovieId,
        /// The theater that was already assigned.
        theater_id: TheaterId,
    },

    /// An internal error that should not happen in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StoreError {
    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
