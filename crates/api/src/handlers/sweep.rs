//! Handler for the manual idle-lead sweep trigger.

use axum::extract::State;
use axum::Json;

use crate::engine::SweepReport;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sweep/idle (admin)
///
/// Reclaim leads stuck in `Uncalled` past the staleness threshold and
/// redistribute them across the online roster. Returns the full report so
/// the admin sees exactly which leads moved where.
pub async fn run_idle_sweep(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<SweepReport>>> {
    tracing::info!(triggered_by = admin.sales_person_id, "Manual idle-lead sweep requested");
    let report = state.engine.run_idle_sweep().await?;
    Ok(Json(DataResponse { data: report }))
}
