//! Refresh-token session model and DTOs.

use sqlx::FromRow;

use leadflow_core::types::{DbId, Timestamp};

/// Full row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub sales_person_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session after a successful login or refresh.
#[derive(Debug)]
pub struct CreateSession {
    pub sales_person_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
