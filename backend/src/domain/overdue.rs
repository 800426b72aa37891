//! Due-date arithmetic for issued components.
//!
//! Everything here is derived on read against the caller's "now"; nothing is
//! ever stored, since a stored overdue flag would go stale the moment the
//! clock moves.

use chrono::{DateTime, NaiveDate, Utc};

/// Whole days between "now" and the due date.
///
/// 0 means due today; negative values count days overdue. Due dates are
/// calendar dates, so the comparison happens at day granularity.
pub fn days_remaining(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    (due_date - now.date_naive()).num_days()
}

/// An outstanding loan is overdue once its due date is fully in the past.
/// A loan due today is not yet overdue.
pub fn is_overdue(due_date: NaiveDate, now: DateTime<Utc>) -> bool {
    days_remaining(due_date, now) < 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_due_today_is_zero_days_and_not_overdue() {
        let now = noon(2024, 3, 15);
        let due = now.date_naive();
        assert_eq!(days_remaining(due, now), 0);
        assert!(!is_overdue(due, now));
    }

    #[test]
    fn test_due_yesterday_is_one_day_overdue() {
        let now = noon(2024, 3, 15);
        let due = (now - Duration::days(1)).date_naive();
        assert_eq!(days_remaining(due, now), -1);
        assert!(is_overdue(due, now));
    }

    #[test]
    fn test_due_tomorrow_is_one_day_remaining() {
        let now = noon(2024, 3, 15);
        let due = (now + Duration::days(1)).date_naive();
        assert_eq!(days_remaining(due, now), 1);
        assert!(!is_overdue(due, now));
    }

    #[test]
    fn test_day_boundary_not_time_of_day() {
        // Late in the evening a loan due today still counts as due today.
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 0).unwrap();
        let due = now.date_naive();
        assert_eq!(days_remaining(due, now), 0);
        assert!(!is_overdue(due, now));
    }
}
