//! Aggregate rows backing the dashboard queries.

use serde::Serialize;
use sqlx::FromRow;

/// Pipeline-stage counts for one salesperson's leads.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct StatusCounts {
    pub contacted: i64,
    pub quotation: i64,
    pub negotiation: i64,
    pub closed_won: i64,
    pub closed_lost: i64,
}

/// Per-salesperson performance aggregates, one row per roster name that has
/// ever held a lead.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalesPerformance {
    pub sales_name: String,
    pub total_leads: i64,
    #[sqlx(flatten)]
    pub status_counts: StatusCounts,
    /// Sum of `sale_value` over closed-won leads.
    pub revenue: f64,
    /// Closed-won share of this salesperson's leads, as a percentage.
    /// Computed after the fetch; not a database column.
    #[sqlx(default)]
    pub conversion_rate: f64,
}

/// Closed-won leads as a percentage of the total. Zero leads is zero
/// percent, not a division error.
pub fn conversion_rate(closed_won: i64, total_leads: i64) -> f64 {
    if total_leads > 0 {
        closed_won as f64 / total_leads as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rate_is_a_percentage() {
        assert_eq!(conversion_rate(3, 8), 37.5);
        assert_eq!(conversion_rate(1, 1), 100.0);
        assert_eq!(conversion_rate(0, 5), 0.0);
    }

    #[test]
    fn test_conversion_rate_of_empty_book_is_zero() {
        assert_eq!(conversion_rate(0, 0), 0.0);
    }
}
