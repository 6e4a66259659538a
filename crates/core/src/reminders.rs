//! Date predicates behind the reminder scanners.
//!
//! The scanners themselves are read-only repository queries; these helpers
//! hold the date math so the matching rules stay unit-testable without a
//! database. All comparisons on `follow_up_date` and `birth_date` are
//! date-only; birthdays ignore the year entirely.

use chrono::{Datelike, Duration, NaiveDate};

use crate::lead::CallStatus;
use crate::types::Timestamp;

/// Leads still `Uncalled` this many minutes after creation need a nudge.
pub const STALE_UNCALLED_MINUTES: i64 = 10;

/// Whether a lead qualifies for the stale-uncalled reminder.
pub fn is_stale_uncalled(status: CallStatus, created_at: Timestamp, now: Timestamp) -> bool {
    status == CallStatus::Uncalled && created_at < now - Duration::minutes(STALE_UNCALLED_MINUTES)
}

/// Whether a lead's follow-up is due on `today`.
///
/// Terminal leads are excluded -- a closed deal has nothing left to follow
/// up on.
pub fn is_due_follow_up(
    follow_up_date: Option<NaiveDate>,
    status: CallStatus,
    today: NaiveDate,
) -> bool {
    !status.is_terminal() && follow_up_date == Some(today)
}

/// Whether a lead's birthday falls on `today`, comparing month and day only.
pub fn is_birthday_on(birth_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match birth_date {
        Some(birth) => birth.month() == today.month() && birth.day() == today.day(),
        None => false,
    }
}

/// Whether a lead's birthday falls anywhere in `today`'s month.
pub fn is_birthday_in_month(birth_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match birth_date {
        Some(birth) => birth.month() == today.month(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stale_uncalled_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let eleven_min_ago = now - Duration::minutes(11);
        let nine_min_ago = now - Duration::minutes(9);
        let exactly_ten = now - Duration::minutes(STALE_UNCALLED_MINUTES);

        assert!(is_stale_uncalled(CallStatus::Uncalled, eleven_min_ago, now));
        assert!(!is_stale_uncalled(CallStatus::Uncalled, nine_min_ago, now));
        // Strictly older than the threshold.
        assert!(!is_stale_uncalled(CallStatus::Uncalled, exactly_ten, now));
        // Only the initial status counts as stale.
        assert!(!is_stale_uncalled(CallStatus::Contacted, eleven_min_ago, now));
    }

    #[test]
    fn test_follow_up_due_today_only() {
        let today = date(2024, 6, 15);

        assert!(is_due_follow_up(Some(today), CallStatus::FollowUp, today));
        assert!(!is_due_follow_up(Some(date(2024, 6, 16)), CallStatus::FollowUp, today));
        assert!(!is_due_follow_up(None, CallStatus::FollowUp, today));
    }

    #[test]
    fn test_follow_up_excludes_terminal_statuses() {
        let today = date(2024, 6, 15);

        assert!(!is_due_follow_up(Some(today), CallStatus::ClosedWon, today));
        assert!(!is_due_follow_up(Some(today), CallStatus::ClosedLost, today));
        assert!(is_due_follow_up(Some(today), CallStatus::Uncalled, today));
    }

    #[test]
    fn test_birthday_match_ignores_year() {
        let birth = Some(date(1990, 3, 22));

        // Matches on any year when month/day line up.
        assert!(is_birthday_on(birth, date(2024, 3, 22)));
        assert!(is_birthday_on(birth, date(1999, 3, 22)));
        // And on no other date.
        assert!(!is_birthday_on(birth, date(2024, 3, 21)));
        assert!(!is_birthday_on(birth, date(2024, 4, 22)));
        assert!(!is_birthday_on(None, date(2024, 3, 22)));
    }

    #[test]
    fn test_birthday_month_match() {
        let birth = Some(date(1985, 12, 5));

        assert!(is_birthday_in_month(birth, date(2024, 12, 25)));
        assert!(!is_birthday_in_month(birth, date(2024, 11, 5)));
        assert!(!is_birthday_in_month(None, date(2024, 12, 25)));
    }
}
