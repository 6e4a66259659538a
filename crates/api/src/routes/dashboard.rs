//! Route definitions for the `/dashboard` views.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary      -> aggregate summary (?sales_name= for personal stats)
/// GET /performance  -> per-salesperson revenue leaderboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/performance", get(dashboard::performance))
}
