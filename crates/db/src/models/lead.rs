//! Lead entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use leadflow_core::lead::{CallStatus, LookupId, Program};
use leadflow_core::sweep::SweepLead;
use leadflow_core::types::{DbId, Timestamp};

/// Full lead row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub program_id: LookupId,
    pub status_id: LookupId,
    pub assigned_sales_id: Option<DbId>,
    pub assigned_sales_name: String,
    pub sale_value: f64,
    pub notes: String,
    pub follow_up_date: Option<NaiveDate>,
    pub appointment_date: Option<NaiveDate>,
    pub admin_submitter: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    /// Project this row into the sweep planner's view.
    ///
    /// Returns `None` for rows whose lookup ids do not resolve (schema
    /// drift); callers log and skip those.
    pub fn to_sweep_lead(&self) -> Option<SweepLead> {
        Some(SweepLead {
            id: self.id,
            program: Program::from_id(self.program_id)?,
            status: CallStatus::from_id(self.status_id)?,
            created_at: self.created_at,
            assigned_sales_id: self.assigned_sales_id,
            assigned_sales_name: self.assigned_sales_name.clone(),
        })
    }
}

/// DTO for inserting a new lead. Assignment fields are filled in by the
/// engine before the insert -- leads are never created unassigned.
#[derive(Debug, Clone)]
pub struct CreateLead {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub program_id: LookupId,
    pub assigned_sales_id: Option<DbId>,
    pub assigned_sales_name: String,
    pub admin_submitter: String,
}

/// DTO for workflow updates. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLead {
    pub status_id: Option<LookupId>,
    pub notes: Option<String>,
    pub sale_value: Option<f64>,
    pub follow_up_date: Option<NaiveDate>,
    pub appointment_date: Option<NaiveDate>,
    pub address: Option<String>,
}
