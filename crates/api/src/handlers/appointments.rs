//! Handlers for the `/appointments` resource.
//!
//! The batch endpoint creates the full five-touchpoint after-care schedule
//! in one atomic insert; there is no single-appointment create.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use leadflow_core::appointments::{batch_schedule, AFTER_CARE_BUCKET};
use leadflow_core::types::DbId;
use leadflow_db::models::appointment::{Appointment, CreateAppointment};
use leadflow_db::repositories::AppointmentRepo;
use leadflow_events::CrmEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /appointments/batch`.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchScheduleRequest {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    /// The service date the five offsets are computed from.
    pub base_date: NaiveDate,
    /// Owner of the follow-ups; defaults to the shared after-care bucket.
    pub assigned_to: Option<String>,
    /// Originating lead, if the schedule was triggered from one.
    pub lead_id: Option<DbId>,
}

/// POST /api/v1/appointments/batch
///
/// Create the five fixed follow-ups (+1 day, +1/3/6 months, +1 year) in a
/// single statement. Either all five rows exist afterwards or none do.
pub async fn create_batch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<BatchScheduleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Appointment>>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let assigned_to = input
        .assigned_to
        .unwrap_or_else(|| AFTER_CARE_BUCKET.to_string());

    let inputs: Vec<CreateAppointment> = batch_schedule(input.base_date)
        .into_iter()
        .map(|(offset, date)| CreateAppointment {
            customer_name: input.customer_name.clone(),
            appointment_date: date,
            follow_up_type: offset.label().to_string(),
            assigned_to: assigned_to.clone(),
            lead_id: input.lead_id,
        })
        .collect();

    let appointments = AppointmentRepo::insert_batch(&state.pool, &inputs).await?;

    tracing::info!(
        customer = %input.customer_name,
        base_date = %input.base_date,
        count = appointments.len(),
        "After-care schedule created"
    );

    let mut event = CrmEvent::new("appointment.batch_created")
        .with_actor(user.sales_person_id)
        .with_payload(serde_json::json!({
            "customer_name": input.customer_name,
            "base_date": input.base_date,
            "count": appointments.len(),
        }));
    if let Some(lead_id) = input.lead_id {
        event = event.with_source("lead", lead_id);
    }
    state.event_bus.publish(event);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: appointments }),
    ))
}

/// GET /api/v1/appointments -- every appointment, soonest first.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Appointment>>>> {
    let appointments = AppointmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: appointments }))
}
