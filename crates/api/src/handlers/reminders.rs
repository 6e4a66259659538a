//! Handlers for the `/reminders` scanners.
//!
//! Each scanner is a read-only query over the current lead set; nothing is
//! persisted and no notification state is kept. Sales accounts see only
//! their own reminders, admins see everyone's.

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, Duration, Utc};

use leadflow_core::reminders::STALE_UNCALLED_MINUTES;
use leadflow_core::roles::ROLE_SALES;
use leadflow_db::models::lead::Lead;
use leadflow_db::repositories::LeadRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reminders/stale-uncalled
///
/// Leads still uncalled ten minutes after creation.
pub async fn stale_uncalled(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let cutoff = Utc::now() - Duration::minutes(STALE_UNCALLED_MINUTES);
    let leads = LeadRepo::list_stale_uncalled(&state.pool, cutoff).await?;
    Ok(Json(DataResponse {
        data: scope_to_caller(leads, &user),
    }))
}

/// GET /api/v1/reminders/follow-ups/due-today
pub async fn follow_ups_due_today(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let today = Utc::now().date_naive();
    let leads = LeadRepo::list_due_follow_ups(&state.pool, today).await?;
    Ok(Json(DataResponse {
        data: scope_to_caller(leads, &user),
    }))
}

/// GET /api/v1/reminders/birthdays/today
///
/// Month and day match; the birth year is ignored.
pub async fn birthdays_today(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let today = Utc::now().date_naive();
    let leads = LeadRepo::list_birthdays_on(&state.pool, today.month(), today.day()).await?;
    Ok(Json(DataResponse {
        data: scope_to_caller(leads, &user),
    }))
}

/// GET /api/v1/reminders/birthdays/this-month
pub async fn birthdays_this_month(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let today = Utc::now().date_naive();
    let leads = LeadRepo::list_birthdays_in_month(&state.pool, today.month()).await?;
    Ok(Json(DataResponse {
        data: scope_to_caller(leads, &user),
    }))
}

/// Restrict reminder results to the caller's own leads for sales accounts.
fn scope_to_caller(leads: Vec<Lead>, user: &AuthUser) -> Vec<Lead> {
    if user.role == ROLE_SALES {
        leads
            .into_iter()
            .filter(|l| l.assigned_sales_id == Some(user.sales_person_id))
            .collect()
    } else {
        leads
    }
}
