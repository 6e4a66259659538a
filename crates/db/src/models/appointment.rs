//! After-care appointment entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use leadflow_core::types::{DbId, Timestamp};

/// Full row from the `appointments` table. Appointments are append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub customer_name: String,
    pub appointment_date: NaiveDate,
    /// One of the five fixed offset labels, e.g. `"+1 month"`.
    pub follow_up_type: String,
    /// Salesperson name or the fixed `"After Care"` bucket.
    pub assigned_to: String,
    pub lead_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for one appointment inside a batch insert.
#[derive(Debug, Clone)]
pub struct CreateAppointment {
    pub customer_name: String,
    pub appointment_date: NaiveDate,
    pub follow_up_type: String,
    pub assigned_to: String,
    pub lead_id: Option<DbId>,
}
