//! Aggregate queries for the dashboard.
//!
//! Every summary query takes an optional salesperson name; when given, the
//! aggregates cover only that person's leads instead of the whole book.

use sqlx::PgPool;

use leadflow_core::lead::{CallStatus, LookupId};

use crate::models::stats::{conversion_rate, SalesPerformance};

/// Read-only aggregate queries over the `leads` table.
pub struct StatsRepo;

impl StatsRepo {
    /// Total number of leads, optionally scoped to one salesperson.
    pub async fn total_leads(
        pool: &PgPool,
        sales_name: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM leads
             WHERE ($1::TEXT IS NULL OR assigned_sales_name = $1)",
        )
        .bind(sales_name)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Lead counts grouped by call status, optionally scoped to one
    /// salesperson.
    pub async fn status_counts(
        pool: &PgPool,
        sales_name: Option<&str>,
    ) -> Result<Vec<(LookupId, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT status_id, COUNT(*) FROM leads
             WHERE ($1::TEXT IS NULL OR assigned_sales_name = $1)
             GROUP BY status_id",
        )
        .bind(sales_name)
        .fetch_all(pool)
        .await
    }

    /// Revenue booked across closed-won leads, optionally scoped to one
    /// salesperson.
    pub async fn total_revenue(
        pool: &PgPool,
        sales_name: Option<&str>,
    ) -> Result<f64, sqlx::Error> {
        let (revenue,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(sale_value), 0) FROM leads
             WHERE status_id = $1
               AND ($2::TEXT IS NULL OR assigned_sales_name = $2)",
        )
        .bind(CallStatus::ClosedWon.id())
        .bind(sales_name)
        .fetch_one(pool)
        .await?;
        Ok(revenue)
    }

    /// Per-salesperson performance, best revenue first. The leaderboard rank
    /// is the row's 1-based position in this ordering.
    pub async fn performance_by_sales(pool: &PgPool) -> Result<Vec<SalesPerformance>, sqlx::Error> {
        let mut rows = sqlx::query_as::<_, SalesPerformance>(
            "SELECT assigned_sales_name AS sales_name,
                    COUNT(*) AS total_leads,
                    COUNT(*) FILTER (WHERE status_id = $1) AS contacted,
                    COUNT(*) FILTER (WHERE status_id = $2) AS quotation,
                    COUNT(*) FILTER (WHERE status_id = $3) AS negotiation,
                    COUNT(*) FILTER (WHERE status_id = $4) AS closed_won,
                    COUNT(*) FILTER (WHERE status_id = $5) AS closed_lost,
                    COALESCE(SUM(sale_value) FILTER (WHERE status_id = $4), 0) AS revenue
             FROM leads
             WHERE assigned_sales_name <> ''
             GROUP BY assigned_sales_name
             ORDER BY revenue DESC, total_leads DESC, sales_name ASC",
        )
        .bind(CallStatus::Contacted.id())
        .bind(CallStatus::Quotation.id())
        .bind(CallStatus::Negotiation.id())
        .bind(CallStatus::ClosedWon.id())
        .bind(CallStatus::ClosedLost.id())
        .fetch_all(pool)
        .await?;

        for row in &mut rows {
            row.conversion_rate = conversion_rate(row.status_counts.closed_won, row.total_leads);
        }
        Ok(rows)
    }
}
