//! Route definitions for the `/roster` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::roster;
use crate::state::AppState;

/// Routes mounted at `/roster`.
///
/// ```text
/// GET    /         -> list members with availability
/// POST   /         -> create member (admin)
/// PUT    /status   -> toggle own availability
/// DELETE /{id}     -> remove member (super admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(roster::list).post(roster::create))
        .route("/status", put(roster::update_status))
        .route("/{id}", delete(roster::delete))
}
