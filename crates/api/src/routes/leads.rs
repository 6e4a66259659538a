//! Route definitions for the `/leads` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// POST  /register  -> public intake form
/// POST  /          -> authenticated entry (sales keeps it, admin may direct)
/// GET   /          -> list all (admin)
/// GET   /my        -> caller's open pipeline
/// PATCH /{id}      -> workflow update (owner or admin)
/// DELETE /{id}     -> hard delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(leads::register))
        .route("/", post(leads::create).get(leads::list))
        .route("/my", get(leads::list_my))
        .route("/{id}", patch(leads::update).delete(leads::delete))
}
