//! HTTP route handlers.

use axum::extract::{Path, State};
use axum::routing::any;
use axum::Router;

use crate::command::{self, CommandReply};
use crate::parser::ApiRequest;
use crate::state::AppState;

/// `/api` routes.
///
/// The whole grammar lives in the path, so the route is method-agnostic:
/// a `POST /api/listmovies` answers the same as a `GET`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/api/:command", any(handle_command))
}

async fn handle_command(
    State(state): State<AppState>,
    Path(command): Path<String>,
) -> CommandReply {
    let request = ApiRequest::parse_command(&command);
    command::execute(&state.store, &request)
}

/// Fallback handler for any path outside the grammar.
pub async fn invalid_request() -> CommandReply {
    CommandReply::invalid_request()
}
