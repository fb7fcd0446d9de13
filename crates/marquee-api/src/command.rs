//! Command execution and command-status → HTTP-status mapping.
//!
//! Executing a parsed [`ApiRequest`] yields a [`CommandReply`]: a shared
//! body snapshot plus a [`CommandStatus`]. The reply converts into an HTTP
//! response with `Ok` → 200, `Rejected` → 403, `InvalidReq` → 400, body
//! `text/plain`.
//!
//! Listing replies hand out the store's cached snapshots untouched; the
//! fixed bodies (booking confirmation and the failure texts) are
//! allocated once per process.

use std::sync::{Arc, OnceLock};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use marquee_store::{BookingResult, BookingStore};

use crate::parser::ApiRequest;

/// Status of executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command was carried out successfully.
    Ok,
    /// The command was valid but rejected, e.g. booking a taken seat.
    Rejected,
    /// The command was invalid. This indicates an error in client code.
    InvalidReq,
}

/// The result of executing a command: a body and its status.
#[derive(Debug, Clone)]
pub struct CommandReply {
    status: CommandStatus,
    body: Arc<str>,
}

fn fixed_body(cell: &'static OnceLock<Arc<str>>, text: &'static str) -> Arc<str> {
    Arc::clone(cell.get_or_init(|| Arc::from(text)))
}

fn invalid_request_body() -> Arc<str> {
    static BODY: OnceLock<Arc<str>> = OnceLock::new();
    fixed_body(&BODY, "Invalid request\r\n")
}

fn invalid_movie_body() -> Arc<str> {
    static BODY: OnceLock<Arc<str>> = OnceLock::new();
    fixed_body(&BODY, "Invalid movieid\r\n")
}

fn invalid_room_body() -> Arc<str> {
    static BODY: OnceLock<Arc<str>> = OnceLock::new();
    fixed_body(&BODY, "Invalid combination of movieid and theaterid\r\n")
}

fn invalid_booking_body() -> Arc<str> {
    static BODY: OnceLock<Arc<str>> = OnceLock::new();
    fixed_body(&BODY, "Invalid movieid, theaterid or seatnumbers\r\n")
}

fn seats_not_available_body() -> Arc<str> {
    static BODY: OnceLock<Arc<str>> = OnceLock::new();
    fixed_body(&BODY, "Seats not available\r\n")
}

fn booking_ok_body() -> Arc<str> {
    static BODY: OnceLock<Arc<str>> = OnceLock::new();
    fixed_body(&BODY, "Booking OK\r\n")
}

impl CommandReply {
    fn ok(body: Arc<str>) -> Self {
        Self {
            status: CommandStatus::Ok,
            body,
        }
    }

    fn rejected(body: Arc<str>) -> Self {
        Self {
            status: CommandStatus::Rejected,
            body,
        }
    }

    fn invalid(body: Arc<str>) -> Self {
        Self {
            status: CommandStatus::InvalidReq,
            body,
        }
    }

    /// The reply for a request that matched no recognised pattern.
    #[must_use]
    pub fn invalid_request() -> Self {
        Self::invalid(invalid_request_body())
    }

    /// Returns the command status.
    #[must_use]
    pub fn status(&self) -> CommandStatus {
        self.status
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for CommandReply {
    fn into_response(self) -> Response {
        let status = match self.status {
            CommandStatus::Ok => StatusCode::OK,
            CommandStatus::Rejected => StatusCode::FORBIDDEN,
            CommandStatus::InvalidReq => StatusCode::BAD_REQUEST,
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain")],
            String::from(&*self.body),
        )
            .into_response()
    }
}

/// Executes a parsed request against the store.
///
/// Store-level failures never escape: each operation maps its errors to
/// the fixed invalid-request body for that operation, exactly as clients
/// expect on the wire.
#[must_use]
pub fn execute(store: &BookingStore, request: &ApiRequest) -> CommandReply {
    match request {
        ApiRequest::ListMovies => match store.list_movies() {
            Ok(body) => CommandReply::ok(body),
            Err(_) => CommandReply::invalid_request(),
        },
        ApiRequest::ListTheaters { movie_id } => {
            match store.list_theaters_for_movie(*movie_id) {
                Ok(body) => CommandReply::ok(body),
                Err(_) => CommandReply::invalid(invalid_movie_body()),
            }
        }
        ApiRequest::ListSeats {
            movie_id,
            theater_id,
        } => match store.list_available_seats(*movie_id, *theater_id) {
            Ok(body) => CommandReply::ok(body),
            Err(_) => CommandReply::invalid(invalid_room_body()),
        },
        ApiRequest::Book {
            movie_id,
            theater_id,
            seats,
        } => match store.book(*movie_id, *theater_id, seats) {
            Ok(BookingResult::Accepted) => CommandReply::ok(booking_ok_body()),
            Ok(BookingResult::NotAvailable) => {
                CommandReply::rejected(seats_not_available_body())
            }
            Ok(BookingResult::Invalid) | Err(_) => {
                CommandReply::invalid(invalid_booking_body())
            }
        },
        ApiRequest::Invalid => CommandReply::invalid_request(),
    }
}
