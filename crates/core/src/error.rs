use crate::types::DbId;

/// General-purpose domain error shared across layers.
///
/// Assignment- and sweep-specific failures have their own taxonomies
/// ([`crate::assignment::AssignmentError`], [`crate::sweep::SweepError`]);
/// this enum covers the cross-cutting cases the HTTP layer maps to status
/// codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
