//! # Habitboard Core Library
//!
//! This library provides the core logic of a shared habit board: each user
//! keeps an ordered list of habits, checks them in daily, and reads derived
//! statistics. The CLI binary and any other front end are thin layers over
//! the same core.
//!
//! ## Architecture
//!
//! - **Log model**: a sparse day-key to value map per (user, habit)
//! - **Check-in state machine**: the only way a log value changes
//! - **Stats**: streaks, monthly and overall consistency, month heatmap;
//!   pure functions over a store snapshot
//! - **Storage**: store traits with subscribe/set semantics, backed by memory
//!   or SQLite, plus TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitBoard`]: command entry point (check-in, add, remove, reorder)
//! - [`HabitRegistry`]: ordered per-user habit list
//! - [`LogStore`] / [`HabitStore`]: persistence contracts
//! - [`Config`]: application configuration management

pub mod board;
pub mod checkin;
pub mod date;
pub mod defaults;
pub mod error;
pub mod habit;
pub mod log;
pub mod registry;
pub mod stats;
pub mod storage;

pub use board::{CheckIn, HabitBoard, NewHabit};
pub use checkin::{advance, day_status, DayStatus};
pub use date::{day_key, days_in_month, parse_day_key, today_local, WeekStart, YearMonth};
pub use error::{ConfigError, CoreError, DatabaseError, RegistryError, Result};
pub use habit::{ColorTheme, Habit, HabitType, UserId};
pub use log::{HabitLog, LogValue, UserLogs};
pub use registry::HabitRegistry;
pub use stats::{
    monthly_stats, overall_consistency, streak, HabitReport, Heatmap, HeatmapCell, MonthlyStats,
    UserReport,
};
pub use storage::{Config, HabitStore, LogStore, MemoryStore, SqliteStore, Subscription};
