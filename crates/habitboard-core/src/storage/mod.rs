//! Persistence for habit lists and check-in logs.
//!
//! The board talks to storage only through [`LogStore`] and [`HabitStore`].
//! Both follow the same contract: reads return the latest applied snapshot,
//! writes replace one cell (logs) or one whole list (habits) with last
//! writer wins, and subscribers are notified after each write.

mod config;
pub mod database;
mod memory;
pub mod migrations;
pub mod subscription;

pub use config::Config;
pub use database::SqliteStore;
pub use memory::MemoryStore;
pub use subscription::{Subscribers, Subscription};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::habit::{Habit, UserId};
use crate::log::{LogValue, UserLogs};

/// Per-user check-in logs.
pub trait LogStore {
    /// Snapshot of every habit log of `user`. Unknown users read as empty.
    fn logs(&self, user: &UserId) -> Result<UserLogs>;

    /// Write one cell. `None` clears it back to absent.
    fn set_log(
        &self,
        user: &UserId,
        habit_id: &str,
        day_key: &str,
        value: Option<LogValue>,
    ) -> Result<()>;

    /// Get notified with the new snapshot after each write for `user`.
    fn subscribe_logs(
        &self,
        user: &UserId,
        callback: Box<dyn Fn(&UserId, &UserLogs) + Send + Sync>,
    ) -> Subscription;
}

/// Per-user ordered habit lists.
pub trait HabitStore {
    /// The stored list, or `None` when it was never written.
    fn habits(&self, user: &UserId) -> Result<Option<Vec<Habit>>>;

    /// Replace the whole list.
    fn set_habits(&self, user: &UserId, habits: &[Habit]) -> Result<()>;

    /// Get notified with the new list after each write for `user`.
    fn subscribe_habits(
        &self,
        user: &UserId,
        callback: Box<dyn Fn(&UserId, &Vec<Habit>) + Send + Sync>,
    ) -> Subscription;
}

/// Returns `~/.config/habitboard[-dev]/` based on HABITBOARD_ENV.
///
/// Set HABITBOARD_ENV=dev to use a development data directory, or
/// HABITBOARD_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HABITBOARD_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitboard-dev")
            } else {
                base_dir.join("habitboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
