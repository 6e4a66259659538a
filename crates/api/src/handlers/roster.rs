//! Handlers for the `/roster` resource (sales team accounts + availability).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use leadflow_core::error::CoreError;
use leadflow_core::roles::{ROLE_ADMIN, ROLE_SALES};
use leadflow_core::roster::AgentStatus;
use leadflow_core::types::DbId;
use leadflow_db::models::sales_person::{CreateSalesPerson, SalesPersonResponse};
use leadflow_db::repositories::{SalesPersonRepo, SessionRepo};
use leadflow_events::CrmEvent;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireSuperAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /roster` (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Role name; defaults to `"sales"`. Only `"sales"` and `"admin"` can be
    /// granted here.
    pub role: Option<String>,
}

/// Request body for `PUT /roster/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// `"online"` or `"offline"`.
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/roster -- every account, with availability.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SalesPersonResponse>>>> {
    let members = SalesPersonRepo::list(&state.pool).await?;
    let data = members.iter().map(SalesPersonResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/roster/status -- the caller toggles its own availability.
///
/// Going offline takes the account out of the round-robin rotation on the
/// very next submission; the engine snapshots the roster per decision.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<StatusCode> {
    let status = AgentStatus::parse(&input.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {}", input.status)))?;

    let updated = SalesPersonRepo::update_status(&state.pool, user.sales_person_id, status).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "sales person",
            id: user.sales_person_id,
        }));
    }

    state.event_bus.publish(
        CrmEvent::new("roster.status_changed")
            .with_source("sales_person", user.sales_person_id)
            .with_actor(user.sales_person_id)
            .with_payload(serde_json::json!({ "status": status.slug() })),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/roster (admin) -- register a new account.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateMemberRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SalesPersonResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    let role = input.role.unwrap_or_else(|| ROLE_SALES.to_string());
    if role != ROLE_SALES && role != ROLE_ADMIN {
        return Err(AppError::BadRequest(format!("Cannot grant role: {role}")));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let member = SalesPersonRepo::create(
        &state.pool,
        &CreateSalesPerson {
            name: input.name,
            email: input.email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(
        member_id = member.id,
        name = %member.name,
        role = %member.role,
        created_by = admin.sales_person_id,
        "Roster member created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SalesPersonResponse::from(&member),
        }),
    ))
}

/// DELETE /api/v1/roster/{id} (super admin) -- remove an account.
///
/// The member's leads keep their denormalized name; the assignment FK nulls
/// out so the next sweep redistributes anything still uncalled.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.sales_person_id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".into(),
        ));
    }

    // Sessions cascade with the row, but revoke first so the delete is
    // effective even while the member holds a live access token's refresh.
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    let deleted = SalesPersonRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "sales person",
            id,
        }));
    }

    tracing::info!(member_id = id, deleted_by = admin.sales_person_id, "Roster member deleted");

    Ok(StatusCode::NO_CONTENT)
}
