//! # marquee-api
//!
//! HTTP front end for the Marquee booking service.
//!
//! The wire protocol is a small fixed grammar of GET-style paths under
//! `/api/` returning plain-text bodies whose lines end in CRLF:
//!
//! - `/api/listmovies`
//! - `/api/listtheaters_<movie_id>`
//! - `/api/listseats_<movie_id>_<theater_id>`
//! - `/api/book_<movie_id>_<theater_id>_<seat>[_<seat>…]`
//!
//! Requests are parsed by [`parser`], executed against the booking store
//! by [`command`], and the command status is mapped onto HTTP: `Ok` → 200,
//! `Rejected` → 403, `InvalidReq` → 400. Anything unparseable is an
//! invalid request.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod parser;
pub mod routes;
pub mod seed;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, ServerBuilder};
