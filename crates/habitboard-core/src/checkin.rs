//! Check-in state machine.
//!
//! This module defines how one check-in changes the value recorded for a
//! habit on a day, and how a recorded value reads back as a display status:
//! - **Standard**: `absent -> Done -> absent` (toggle)
//! - **Two-step**: `absent -> Partial -> Complete -> absent` (cycle of 3)
//!
//! [`advance`] is the only way a log value changes. It is a cycle, so
//! replaying a check-in advances the state again.

use serde::{Deserialize, Serialize};

use crate::habit::HabitType;
use crate::log::LogValue;

/// Next value after one check-in. `None` clears the day.
pub fn advance(habit_type: HabitType, current: Option<LogValue>) -> Option<LogValue> {
    match habit_type {
        HabitType::Standard => match current {
            None => Some(LogValue::Done),
            Some(_) => None,
        },
        HabitType::TwoStep => from_level((level(current) + 1) % 3),
    }
}

/// Two-step progress of a stored value. A `Done` left on a two-step habit
/// counts as one check-in.
fn level(value: Option<LogValue>) -> u8 {
    match value {
        None => 0,
        Some(LogValue::Done) | Some(LogValue::Partial) => 1,
        Some(LogValue::Complete) => 2,
    }
}

fn from_level(level: u8) -> Option<LogValue> {
    match level {
        1 => Some(LogValue::Partial),
        2 => Some(LogValue::Complete),
        _ => None,
    }
}

/// How a day reads for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Empty,
    Partial,
    Complete,
}

impl DayStatus {
    /// Label shown under the check-in control.
    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Empty => "Check In",
            DayStatus::Partial => "1/2 Done",
            DayStatus::Complete => "Completed!",
        }
    }
}

/// Display status of `value` for a habit of `habit_type`.
///
/// Any present value completes a standard habit. A two-step habit is
/// complete at its second check-in and partial after the first.
pub fn day_status(habit_type: HabitType, value: Option<LogValue>) -> DayStatus {
    match (habit_type, value) {
        (_, None) => DayStatus::Empty,
        (HabitType::Standard, Some(_)) => DayStatus::Complete,
        (HabitType::TwoStep, Some(LogValue::Partial)) => DayStatus::Partial,
        (HabitType::TwoStep, Some(LogValue::Done | LogValue::Complete)) => DayStatus::Complete,
    }
}
