//! Route definitions for the `/reminders` scanners.

use axum::routing::get;
use axum::Router;

use crate::handlers::reminders;
use crate::state::AppState;

/// Routes mounted at `/reminders`. All read-only.
///
/// ```text
/// GET /stale-uncalled          -> leads uncalled past 10 minutes
/// GET /follow-ups/due-today    -> follow-ups due today
/// GET /birthdays/today         -> customer birthdays today
/// GET /birthdays/this-month    -> customer birthdays this month
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stale-uncalled", get(reminders::stale_uncalled))
        .route("/follow-ups/due-today", get(reminders::follow_ups_due_today))
        .route("/birthdays/today", get(reminders::birthdays_today))
        .route("/birthdays/this-month", get(reminders::birthdays_this_month))
}
