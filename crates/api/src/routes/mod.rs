pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod reminders;
pub mod roster;
pub mod sweep;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /leads/register                      public intake form (POST)
/// /leads                               list (admin, GET), create (auth, POST)
/// /leads/my                            caller's open pipeline (GET)
/// /leads/{id}                          update (PATCH), delete (admin, DELETE)
///
/// /roster                              list (GET), create member (admin, POST)
/// /roster/status                       toggle own availability (PUT)
/// /roster/{id}                         remove member (super admin, DELETE)
///
/// /sweep/idle                          run idle-lead sweep (admin, POST)
///
/// /reminders/stale-uncalled            leads uncalled past 10 minutes (GET)
/// /reminders/follow-ups/due-today      follow-ups due today (GET)
/// /reminders/birthdays/today           birthdays today (GET)
/// /reminders/birthdays/this-month      birthdays this month (GET)
///
/// /appointments                        list (GET)
/// /appointments/batch                  create five-touchpoint schedule (POST)
///
/// /dashboard/summary                   aggregate summary (?sales_name=) (GET)
/// /dashboard/performance               revenue leaderboard (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Lead intake, pipeline, and workflow updates.
        .nest("/leads", leads::router())
        // Sales roster and availability.
        .nest("/roster", roster::router())
        // Manual idle-lead sweep trigger.
        .nest("/sweep", sweep::router())
        // Read-only reminder scanners.
        .nest("/reminders", reminders::router())
        // After-care appointment schedules.
        .nest("/appointments", appointments::router())
        // Aggregate dashboard views.
        .nest("/dashboard", dashboard::router())
}
