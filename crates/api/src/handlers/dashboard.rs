//! Handlers for the `/dashboard` aggregate views.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use leadflow_core::lead::{CallStatus, LookupId};
use leadflow_db::models::stats::{conversion_rate, SalesPerformance};
use leadflow_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /dashboard/summary`.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Optional salesperson name. When given, the totals cover only that
    /// person's leads and the response carries their leaderboard rank.
    pub sales_name: Option<String>,
}

/// Response payload for `GET /dashboard/summary`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_leads: i64,
    /// Lead counts keyed by call status slug.
    pub by_status: BTreeMap<&'static str, i64>,
    /// Revenue across closed-won leads.
    pub total_revenue: f64,
    /// Closed-won share of the counted leads, as a percentage.
    pub conversion_rate: f64,
    /// Leaderboard entry when `?sales_name=` was given and has leads.
    pub personal: Option<PersonalStats>,
}

/// One salesperson's slice of the summary.
#[derive(Debug, Serialize)]
pub struct PersonalStats {
    #[serde(flatten)]
    pub performance: SalesPerformance,
    /// 1-based position on the revenue leaderboard.
    pub rank: usize,
}

/// Assemble the summary from raw aggregate rows. Unknown status ids are
/// dropped rather than failing the whole view.
fn build_summary(
    total_leads: i64,
    status_rows: Vec<(LookupId, i64)>,
    total_revenue: f64,
    personal: Option<PersonalStats>,
) -> DashboardSummary {
    let mut by_status = BTreeMap::new();
    let mut closed_won = 0;
    for (status_id, count) in status_rows {
        if let Some(status) = CallStatus::from_id(status_id) {
            if status == CallStatus::ClosedWon {
                closed_won = count;
            }
            by_status.insert(status.slug(), count);
        }
    }

    DashboardSummary {
        total_leads,
        by_status,
        total_revenue,
        conversion_rate: conversion_rate(closed_won, total_leads),
        personal,
    }
}

/// GET /api/v1/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let scope = query.sales_name.as_deref();
    let total_leads = StatsRepo::total_leads(&state.pool, scope).await?;
    let total_revenue = StatsRepo::total_revenue(&state.pool, scope).await?;
    let status_rows = StatsRepo::status_counts(&state.pool, scope).await?;

    let personal = match &query.sales_name {
        Some(name) => {
            let board = StatsRepo::performance_by_sales(&state.pool).await?;
            board
                .into_iter()
                .enumerate()
                .find(|(_, row)| row.sales_name == *name)
                .map(|(idx, performance)| PersonalStats {
                    performance,
                    rank: idx + 1,
                })
        }
        None => None,
    };

    Ok(Json(DataResponse {
        data: build_summary(total_leads, status_rows, total_revenue, personal),
    }))
}

/// GET /api/v1/dashboard/performance -- the full leaderboard, best first.
pub async fn performance(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SalesPerformance>>>> {
    let board = StatsRepo::performance_by_sales(&state.pool).await?;
    Ok(Json(DataResponse { data: board }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_carries_conversion_rate_from_closed_won_share() {
        let rows = vec![
            (CallStatus::Uncalled.id(), 5),
            (CallStatus::ClosedWon.id(), 2),
            (CallStatus::ClosedLost.id(), 1),
        ];
        let summary = build_summary(8, rows, 120_000.0, None);

        assert_eq!(summary.total_leads, 8);
        assert_eq!(summary.conversion_rate, 25.0);
        assert_eq!(summary.by_status.get("uncalled"), Some(&5));
        assert_eq!(summary.by_status.get("closed_won"), Some(&2));
    }

    #[test]
    fn test_summary_of_empty_book_has_zero_conversion() {
        let summary = build_summary(0, Vec::new(), 0.0, None);
        assert_eq!(summary.conversion_rate, 0.0);
        assert!(summary.by_status.is_empty());
    }

    #[test]
    fn test_summary_drops_unknown_status_ids() {
        let rows = vec![(99, 4), (CallStatus::Contacted.id(), 3)];
        let summary = build_summary(7, rows, 0.0, None);
        assert_eq!(summary.by_status.len(), 1);
        assert_eq!(summary.by_status.get("contacted"), Some(&3));
    }
}
