//! Monthly and overall consistency.
//!
//! Consistency is the share of days in a calendar month that carry any log
//! entry. The denominator is always the full month, so days that have not
//! happened yet count as unchecked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{days_in_month, YearMonth};
use crate::habit::Habit;
use crate::log::{HabitLog, UserLogs};

use super::streak::streak;

/// Consistency of one habit over one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// Rounded `checked_days / total_days` as a percentage (0-100)
    pub percentage: u32,
    /// Days of the month with an entry
    pub checked_days: u32,
    /// Days in the month (28-31)
    pub total_days: u32,
}

/// Round `part / whole * 100` to the nearest integer, halves up.
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Consistency of `log` over the month containing `reference`.
pub fn monthly_stats(log: &HabitLog, reference: NaiveDate) -> MonthlyStats {
    let days = days_in_month(YearMonth::of(reference));
    let total_days = days.len() as u32;
    if total_days == 0 {
        return MonthlyStats::default();
    }

    let checked_days = days.iter().filter(|day| log.is_present(**day)).count() as u32;

    MonthlyStats {
        percentage: percent(checked_days, total_days),
        checked_days,
        total_days,
    }
}

/// Days-weighted consistency across all of a user's habits for the month
/// containing `reference`. Habits without a log count as empty.
pub fn overall_consistency(habits: &[Habit], logs: &UserLogs, reference: NaiveDate) -> u32 {
    if habits.is_empty() {
        return 0;
    }

    let empty = HabitLog::new();
    let (checked, possible) = habits
        .iter()
        .map(|habit| monthly_stats(logs.get(&habit.id).unwrap_or(&empty), reference))
        .fold((0u32, 0u32), |(checked, possible), stats| {
            (checked + stats.checked_days, possible + stats.total_days)
        });

    percent(checked, possible)
}

/// Stats line for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitReport {
    pub habit: Habit,
    pub streak: u32,
    pub monthly: MonthlyStats,
}

/// Stats for one user's board in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReport {
    pub user: String,
    /// `YYYY-MM`
    pub month: String,
    /// e.g. `June 2024`
    pub month_label: String,
    pub overall: u32,
    pub habits: Vec<HabitReport>,
}

/// Streak and monthly consistency of every habit, plus the overall score.
///
/// `reference` selects the month; streaks are counted back from `today`.
pub fn user_report(
    user: &str,
    habits: &[Habit],
    logs: &UserLogs,
    today: NaiveDate,
    reference: NaiveDate,
) -> UserReport {
    let empty = HabitLog::new();
    let month = YearMonth::of(reference);

    let habit_reports = habits
        .iter()
        .map(|habit| {
            let log = logs.get(&habit.id).unwrap_or(&empty);
            HabitReport {
                habit: habit.clone(),
                streak: streak(log, today),
                monthly: monthly_stats(log, reference),
            }
        })
        .collect();

    UserReport {
        user: user.to_string(),
        month: month.to_string(),
        month_label: month.label(),
        overall: overall_consistency(habits, logs, reference),
        habits: habit_reports,
    }
}
