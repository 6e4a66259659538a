//! Sales roster entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use leadflow_core::lead::LookupId;
use leadflow_core::roster::AgentStatus;
use leadflow_core::types::{DbId, Timestamp};

/// Full row from the `sales_persons` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`SalesPersonResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct SalesPerson {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status_id: LookupId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SalesPerson {
    /// Whether this roster member is currently online.
    pub fn is_online(&self) -> bool {
        AgentStatus::from_id(self.status_id) == Some(AgentStatus::Online)
    }
}

/// Safe representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct SalesPersonResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    /// `"online"` or `"offline"`.
    pub status: &'static str,
    pub created_at: Timestamp,
}

impl From<&SalesPerson> for SalesPersonResponse {
    fn from(row: &SalesPerson) -> Self {
        let status = AgentStatus::from_id(row.status_id)
            .unwrap_or(AgentStatus::Offline)
            .slug();
        Self {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            role: row.role.clone(),
            status,
            created_at: row.created_at,
        }
    }
}

/// DTO for registering a roster member or admin account.
#[derive(Debug)]
pub struct CreateSalesPerson {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
