//! Statistics module for Habitboard
//!
//! Derived views over a log snapshot: current streaks, monthly and overall
//! consistency, and the month heatmap. Everything here is a pure function of
//! the snapshot and a reference date; missing logs read as empty.

mod consistency;
mod heatmap;
mod streak;

pub use consistency::{
    monthly_stats, overall_consistency, user_report, HabitReport, MonthlyStats, UserReport,
};

pub use heatmap::{heatmap, Heatmap, HeatmapCell};

pub use streak::streak;
