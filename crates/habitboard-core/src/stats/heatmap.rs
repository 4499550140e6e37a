//! Month calendar heatmap for one habit.
//!
//! Lays a month out in whole weeks and tags each cell with the habit's
//! [`DayStatus`]. Cells outside the month are padding and always empty.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::checkin::{day_status, DayStatus};
use crate::date::{calendar_grid, day_key, WeekStart, YearMonth};
use crate::habit::HabitType;
use crate::log::HabitLog;

/// One day in the calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub day_key: String,
    pub in_month: bool,
    pub is_today: bool,
    pub status: DayStatus,
}

impl HeatmapCell {
    fn glyph(&self) -> char {
        if !self.in_month {
            return ' ';
        }
        match self.status {
            DayStatus::Empty => '·',
            DayStatus::Partial => '▒',
            DayStatus::Complete => '█',
        }
    }
}

/// Calendar grid of the month containing `today`, in week rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
    /// `YYYY-MM`
    pub month: String,
    pub week_start: WeekStart,
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// Cells grouped seven per row.
    pub fn weeks(&self) -> impl Iterator<Item = &[HeatmapCell]> {
        self.cells.chunks(7)
    }

    /// Render as a small text calendar; today is bracketed.
    pub fn render_ascii(&self, title: &str) -> String {
        let mut output = String::new();
        output.push_str(title);
        output.push('\n');

        for label in self.week_start.labels() {
            output.push_str(&format!("{:^5}", label));
        }
        output.push('\n');

        for week in self.weeks() {
            for cell in week {
                if !cell.in_month {
                    output.push_str("     ");
                } else if cell.is_today {
                    output.push_str(&format!("[{:>2}{}]", cell.date.day(), cell.glyph()));
                } else {
                    output.push_str(&format!(" {:>2}{} ", cell.date.day(), cell.glyph()));
                }
            }
            output.push('\n');
        }

        output.push_str("Legend: · empty  ▒ partial  █ complete\n");
        output
    }
}

/// Build the heatmap of `log` for the month containing `today`.
pub fn heatmap(
    log: &HabitLog,
    habit_type: HabitType,
    today: NaiveDate,
    week_start: WeekStart,
) -> Heatmap {
    let month = YearMonth::of(today);

    let cells = calendar_grid(month, week_start)
        .into_iter()
        .map(|date| {
            let in_month = YearMonth::of(date) == month;
            let status = if in_month {
                day_status(habit_type, log.on(date))
            } else {
                DayStatus::Empty
            };
            HeatmapCell {
                date,
                day_key: day_key(date),
                in_month,
                is_today: date == today,
                status,
            }
        })
        .collect();

    Heatmap {
        month: month.to_string(),
        week_start,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogValue;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn padding_cells_are_empty_even_with_entries() {
        let log: HabitLog = [("2024-05-31", LogValue::Complete)].into_iter().collect();
        let map = heatmap(&log, HabitType::TwoStep, date(2024, 6, 10), WeekStart::Sunday);

        let may_31 = map.cells.iter().find(|c| c.day_key == "2024-05-31").unwrap();
        assert!(!may_31.in_month);
        assert_eq!(may_31.status, DayStatus::Empty);
    }

    #[test]
    fn cells_carry_status_and_today() {
        let log: HabitLog = [
            ("2024-06-09", LogValue::Partial),
            ("2024-06-10", LogValue::Complete),
        ]
        .into_iter()
        .collect();
        let map = heatmap(&log, HabitType::TwoStep, date(2024, 6, 10), WeekStart::Sunday);

        assert_eq!(map.month, "2024-06");
        assert_eq!(map.cells.len(), 42);
        assert_eq!(map.weeks().count(), 6);

        let partial = map.cells.iter().find(|c| c.day_key == "2024-06-09").unwrap();
        assert_eq!(partial.status, DayStatus::Partial);

        let today: Vec<_> = map.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].status, DayStatus::Complete);
    }

    #[test]
    fn ascii_render_marks_today() {
        let map = heatmap(&HabitLog::new(), HabitType::Standard, date(2024, 6, 10), WeekStart::Monday);
        let text = map.render_ascii("Gym");
        assert!(text.starts_with("Gym\n"));
        assert!(text.contains("[10·]"));
        assert!(text.contains("Legend"));
    }
}
