//! Route definition for the manual idle-lead sweep.

use axum::routing::post;
use axum::Router;

use crate::handlers::sweep;
use crate::state::AppState;

/// Routes mounted at `/sweep`.
///
/// ```text
/// POST /idle  -> run the idle-lead sweep now (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/idle", post(sweep::run_idle_sweep))
}
