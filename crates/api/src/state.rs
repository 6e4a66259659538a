use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::AssignmentEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: leadflow_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Lead assignment and sweep engine. Owns the round-robin cursor.
    pub engine: Arc<AssignmentEngine>,
    /// Centralized event bus for publishing CRM events.
    pub event_bus: Arc<leadflow_events::EventBus>,
}
