//! After-care appointment schedule: five fixed follow-up touchpoints per
//! triggering event.
//!
//! Offsets use calendar-aware arithmetic (`chrono::Months` / `chrono::Days`),
//! so "+1 month" from Jan 31 clamps to the end of February rather than
//! drifting by a fixed day count.

use chrono::{Days, Months, NaiveDate};

/// Assignment bucket for batches that are not owned by a salesperson.
pub const AFTER_CARE_BUCKET: &str = "After Care";

/// The five fixed follow-up offsets, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpOffset {
    OneDay,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl FollowUpOffset {
    /// All offsets, in the order the batch is created.
    pub const ALL: [FollowUpOffset; 5] = [
        FollowUpOffset::OneDay,
        FollowUpOffset::OneMonth,
        FollowUpOffset::ThreeMonths,
        FollowUpOffset::SixMonths,
        FollowUpOffset::OneYear,
    ];

    /// Human-readable label stored on the appointment row.
    pub fn label(self) -> &'static str {
        match self {
            FollowUpOffset::OneDay => "+1 day",
            FollowUpOffset::OneMonth => "+1 month",
            FollowUpOffset::ThreeMonths => "+3 months",
            FollowUpOffset::SixMonths => "+6 months",
            FollowUpOffset::OneYear => "+1 year",
        }
    }

    /// Apply the offset to a base service date.
    pub fn apply(self, base: NaiveDate) -> NaiveDate {
        match self {
            FollowUpOffset::OneDay => base + Days::new(1),
            FollowUpOffset::OneMonth => base + Months::new(1),
            FollowUpOffset::ThreeMonths => base + Months::new(3),
            FollowUpOffset::SixMonths => base + Months::new(6),
            FollowUpOffset::OneYear => base + Months::new(12),
        }
    }
}

/// Compute the full five-appointment schedule for a base service date.
pub fn batch_schedule(base: NaiveDate) -> [(FollowUpOffset, NaiveDate); 5] {
    FollowUpOffset::ALL.map(|offset| (offset, offset.apply(base)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_batch_has_exactly_five_entries_in_order() {
        let schedule = batch_schedule(date(2024, 6, 1));
        assert_eq!(schedule.len(), 5);
        let labels: Vec<&str> = schedule.iter().map(|(o, _)| o.label()).collect();
        assert_eq!(labels, ["+1 day", "+1 month", "+3 months", "+6 months", "+1 year"]);
    }

    #[test]
    fn test_offsets_from_mid_month_base() {
        let schedule = batch_schedule(date(2024, 6, 15));
        let dates: Vec<NaiveDate> = schedule.iter().map(|(_, d)| *d).collect();
        assert_eq!(
            dates,
            [
                date(2024, 6, 16),
                date(2024, 7, 15),
                date(2024, 9, 15),
                date(2024, 12, 15),
                date(2025, 6, 15),
            ]
        );
    }

    #[test]
    fn test_end_of_month_clamping_from_jan_31() {
        // Calendar-aware month addition: Jan 31 + 1 month lands on the last
        // day of February (leap year here).
        let schedule = batch_schedule(date(2024, 1, 31));
        let dates: Vec<NaiveDate> = schedule.iter().map(|(_, d)| *d).collect();
        assert_eq!(
            dates,
            [
                date(2024, 2, 1),
                date(2024, 2, 29),
                date(2024, 4, 30),
                date(2024, 7, 31),
                date(2025, 1, 31),
            ]
        );
    }

    #[test]
    fn test_one_year_from_leap_day_clamps() {
        assert_eq!(
            FollowUpOffset::OneYear.apply(date(2024, 2, 29)),
            date(2025, 2, 28)
        );
    }
}
