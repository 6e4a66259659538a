//! Handlers for the `/leads` resource.
//!
//! Lead creation always goes through the assignment engine; there is no code
//! path that inserts an unassigned lead.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use leadflow_core::assignment::AssignmentOverride;
use leadflow_core::error::CoreError;
use leadflow_core::lead::{CallStatus, Program};
use leadflow_core::roles::ROLE_SALES;
use leadflow_core::types::DbId;
use leadflow_db::models::lead::{Lead, UpdateLead};
use leadflow_db::repositories::{LeadRepo, SalesPersonRepo};
use leadflow_events::CrmEvent;

use crate::engine::NewLeadSubmission;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /leads/register` (public intake form).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterLeadRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 3, max = 32))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    /// Program slug, e.g. `"general"` or `"fix_face_lock"`.
    pub program: String,
}

/// Request body for `POST /leads` (authenticated entry).
///
/// The assignment fields are honored for admins only; sales accounts always
/// receive their own submissions.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 3, max = 32))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub program: String,
    /// Manual assignment by roster id (admin only, wins over name).
    pub assigned_sales_id: Option<DbId>,
    /// Manual assignment by display name (admin only).
    pub assigned_sales_name: Option<String>,
}

/// Request body for `PATCH /leads/{id}`. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    /// Call status slug, e.g. `"contacted"`.
    pub status: Option<String>,
    pub notes: Option<String>,
    pub sale_value: Option<f64>,
    pub follow_up_date: Option<NaiveDate>,
    pub appointment_date: Option<NaiveDate>,
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/leads/register
///
/// Public intake form. The engine picks the assignee (specialist rule or
/// round-robin); the caller has no say in the assignment.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterLeadRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lead>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let program = parse_program(&input.program)?;

    let lead = state
        .engine
        .submit_lead(NewLeadSubmission {
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            birth_date: input.birth_date,
            address: input.address,
            program,
            override_: AssignmentOverride::None,
            admin_submitter: None,
            actor_id: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// POST /api/v1/leads
///
/// Authenticated lead entry. A sales account keeps the lead for itself; an
/// admin may direct it to a specific roster member or let the rotation pick.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateLeadRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lead>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let program = parse_program(&input.program)?;

    let (override_, admin_submitter) = if user.role == ROLE_SALES {
        // Sales entries bypass the rotation and stay with the submitter.
        (AssignmentOverride::ByAgentId(user.sales_person_id), None)
    } else {
        let override_ = match (input.assigned_sales_id, input.assigned_sales_name) {
            (Some(id), _) => AssignmentOverride::ByAgentId(id),
            (None, Some(name)) => AssignmentOverride::ByAgentName(name),
            (None, None) => AssignmentOverride::None,
        };
        let submitter = SalesPersonRepo::find_by_id(&state.pool, user.sales_person_id)
            .await?
            .map(|a| a.name);
        (override_, submitter)
    };

    let lead = state
        .engine
        .submit_lead(NewLeadSubmission {
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            birth_date: input.birth_date,
            address: input.address,
            program,
            override_,
            admin_submitter,
            actor_id: Some(user.sales_person_id),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/leads (admin) -- every lead, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let leads = LeadRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/leads/my -- the caller's open pipeline.
pub async fn list_my(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let leads = LeadRepo::list_open_for_sales(&state.pool, user.sales_person_id).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// PATCH /api/v1/leads/{id}
///
/// Workflow updates (status, notes, sale value, dates). Sales accounts may
/// only touch their own leads; admins may touch any.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLeadRequest>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let existing = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "lead", id })?;

    if user.role == ROLE_SALES && existing.assigned_sales_id != Some(user.sales_person_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot modify a lead assigned to someone else".into(),
        )));
    }

    let status_id = match &input.status {
        Some(slug) => Some(
            CallStatus::parse(slug)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown call status: {slug}")))?
                .id(),
        ),
        None => None,
    };

    let changes = UpdateLead {
        status_id,
        notes: input.notes,
        sale_value: input.sale_value,
        follow_up_date: input.follow_up_date,
        appointment_date: input.appointment_date,
        address: input.address,
    };

    let lead = LeadRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(CoreError::NotFound { entity: "lead", id })?;

    state.event_bus.publish(
        CrmEvent::new("lead.updated")
            .with_source("lead", lead.id)
            .with_actor(user.sales_person_id),
    );

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/leads/{id} (admin) -- hard delete. Returns 204.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LeadRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "lead", id }));
    }

    state.event_bus.publish(
        CrmEvent::new("lead.deleted")
            .with_source("lead", id)
            .with_actor(user.sales_person_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_program(slug: &str) -> Result<Program, AppError> {
    Program::parse(slug).ok_or_else(|| AppError::BadRequest(format!("Unknown program: {slug}")))
}
