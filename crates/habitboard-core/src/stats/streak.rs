//! Current streak of consecutive checked-in days.

use chrono::NaiveDate;

use crate::log::HabitLog;

/// Count consecutive present days ending today, or ending yesterday when
/// today has no entry yet (an unchecked today does not break a streak).
///
/// Presence is what counts: a two-step day at its first check-in extends
/// the streak just like a completed one.
pub fn streak(log: &HabitLog, today: NaiveDate) -> u32 {
    let start = if log.is_present(today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut count = 0;
    let mut cursor = start;
    while let Some(day) = cursor {
        if !log.is_present(day) {
            break;
        }
        count += 1;
        cursor = day.pred_opt();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogValue;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(entries: &[(&str, LogValue)]) -> HabitLog {
        entries.iter().copied().collect()
    }

    #[test]
    fn empty_log_has_no_streak() {
        assert_eq!(streak(&HabitLog::new(), date(2024, 6, 10)), 0);
    }

    #[test]
    fn counts_back_from_today_when_checked() {
        let log = log(&[
            ("2024-06-10", LogValue::Done),
            ("2024-06-09", LogValue::Done),
            ("2024-06-08", LogValue::Done),
        ]);
        assert_eq!(streak(&log, date(2024, 6, 10)), 3);
    }

    #[test]
    fn unchecked_today_counts_back_from_yesterday() {
        let log = log(&[
            ("2024-06-10", LogValue::Done),
            ("2024-06-09", LogValue::Done),
            ("2024-06-08", LogValue::Done),
        ]);
        assert_eq!(streak(&log, date(2024, 6, 11)), 3);
    }

    #[test]
    fn gap_breaks_the_streak() {
        let log = log(&[("2024-06-10", LogValue::Done), ("2024-06-08", LogValue::Done)]);
        assert_eq!(streak(&log, date(2024, 6, 10)), 1);
    }

    #[test]
    fn missing_today_and_yesterday_is_zero() {
        let log = log(&[("2024-06-08", LogValue::Done)]);
        assert_eq!(streak(&log, date(2024, 6, 10)), 0);
    }

    #[test]
    fn partial_two_step_days_count() {
        let log = log(&[
            ("2024-06-10", LogValue::Partial),
            ("2024-06-09", LogValue::Complete),
        ]);
        assert_eq!(streak(&log, date(2024, 6, 10)), 2);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let log = log(&[
            ("2024-03-01", LogValue::Done),
            ("2024-02-29", LogValue::Done),
            ("2024-02-28", LogValue::Done),
        ]);
        assert_eq!(streak(&log, date(2024, 3, 1)), 3);
    }
}
