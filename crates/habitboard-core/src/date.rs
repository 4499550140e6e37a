//! Calendar helpers.
//!
//! Every log entry is keyed by a day-key: the local calendar date formatted
//! as `YYYY-MM-DD`, zero padded. That format is the one wire contract shared
//! with any persisted or transmitted log, so all formatting goes through
//! [`day_key`] and all parsing through [`parse_day_key`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as its canonical day-key.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Parse a day-key back into a date.
///
/// Strict: `2024-6-1` and `2024-06-01T00:00` are rejected.
pub fn parse_day_key(key: &str) -> Result<NaiveDate> {
    if key.len() != 10 {
        return Err(CoreError::InvalidDayKey(key.to_string()));
    }
    NaiveDate::parse_from_str(key, DAY_KEY_FORMAT)
        .map_err(|_| CoreError::InvalidDayKey(key.to_string()))
}

/// Today's date in the local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month (28-31).
    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    /// Human label, e.g. `June 2024`.
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// All days of the month, 1st to last, ascending.
pub fn days_in_month(month: YearMonth) -> Vec<NaiveDate> {
    month.first_day().iter_days().take(month.num_days() as usize).collect()
}

/// First day of the week used when laying out calendar grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Weekday short names in display order.
    pub fn labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

/// Dates covering whole weeks around `month`: from the start of the week
/// containing the 1st to the end of the week containing the last day.
pub fn calendar_grid(month: YearMonth, week_start: WeekStart) -> Vec<NaiveDate> {
    let first = month.first_day();
    let last = month.last_day();

    let start = first.week(week_start.weekday()).first_day();
    let end = last.week(week_start.weekday()).last_day();

    let len = (end - start).num_days() + 1;
    (0..len).map(|offset| start + Duration::days(offset)).collect()
}
