//! Route definitions for the `/appointments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET  /       -> list all, soonest first
/// POST /batch  -> create the five-touchpoint after-care schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list))
        .route("/batch", post(appointments::create_batch))
}
