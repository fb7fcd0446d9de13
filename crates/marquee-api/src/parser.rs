//! Parser for the `/api/…` request grammar.
//!
//! Every request is one path segment under `/api/`, with `_`-separated
//! decimal fields. Anything that does not match the grammar exactly
//! (unknown command, non-digit field, overflow, duplicate seat numbers,
//! more seats than a room holds) parses to [`ApiRequest::Invalid`];
//! callers never see a parse error.

use std::collections::HashSet;

use marquee_core::{MovieId, SeatId, TheaterId, SEATS_PER_ROOM};

/// A parsed API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// List the whole movie catalog.
    ListMovies,
    /// List the theaters playing one movie.
    ListTheaters {
        /// The movie to list theaters for.
        movie_id: MovieId,
    },
    /// List the available seats in one room.
    ListSeats {
        /// The movie side of the room.
        movie_id: MovieId,
        /// The theater side of the room.
        theater_id: TheaterId,
    },
    /// Book a set of seats in one room.
    Book {
        /// The movie side of the room.
        movie_id: MovieId,
        /// The theater side of the room.
        theater_id: TheaterId,
        /// The seats to book; between 1 and [`SEATS_PER_ROOM`] of them,
        /// deduplicated at parse time (duplicates are invalid).
        seats: HashSet<SeatId>,
    },
    /// The request matched no recognised pattern.
    Invalid,
}

impl ApiRequest {
    /// Parses a full request path (`/api/…`).
    #[must_use]
    pub fn parse_path(path: &str) -> Self {
        match path.strip_prefix("/api/") {
            Some(command) => Self::parse_command(command),
            None => Self::Invalid,
        }
    }

    /// Parses the command segment after `/api/`.
    #[must_use]
    pub fn parse_command(command: &str) -> Self {
        if command == "listmovies" {
            return Self::ListMovies;
        }
        if let Some(rest) = command.strip_prefix("listtheaters_") {
            return match rest.parse() {
                Ok(movie_id) => Self::ListTheaters { movie_id },
                Err(_) => Self::Invalid,
            };
        }
        if let Some(rest) = command.strip_prefix("listseats_") {
            return parse_list_seats(rest);
        }
        if let Some(rest) = command.strip_prefix("book_") {
            return parse_book(rest);
        }
        Self::Invalid
    }
}

fn parse_list_seats(rest: &str) -> ApiRequest {
    let Some((movie, theater)) = rest.split_once('_') else {
        return ApiRequest::Invalid;
    };
    match (movie.parse(), theater.parse()) {
        (Ok(movie_id), Ok(theater_id)) => ApiRequest::ListSeats {
            movie_id,
            theater_id,
        },
        _ => ApiRequest::Invalid,
    }
}

fn parse_book(rest: &str) -> ApiRequest {
    let mut fields = rest.split('_');
    let (Some(movie), Some(theater)) = (fields.next(), fields.next()) else {
        return ApiRequest::Invalid;
    };
    let (Ok(movie_id), Ok(theater_id)) = (movie.parse(), theater.parse()) else {
        return ApiRequest::Invalid;
    };

    let seat_fields: Vec<&str> = fields.collect();
    if seat_fields.is_empty() || seat_fields.len() > SEATS_PER_ROOM {
        return ApiRequest::Invalid;
    }

    let mut seats = HashSet::with_capacity(seat_fields.len());
    for field in seat_fields {
        let Ok(seat) = field.parse::<SeatId>() else {
            return ApiRequest::Invalid;
        };
        if !seats.insert(seat) {
            // Booking the same seat twice in one request is a client bug.
            return ApiRequest::Invalid;
        }
    }

    ApiRequest::Book {
        movie_id,
        theater_id,
        seats,
    }
}
