pub mod checkin;
pub mod config;
pub mod habit;
pub mod heatmap;
pub mod stats;

use chrono::NaiveDate;
use habitboard_core::{Config, HabitBoard, SqliteStore, UserId};
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Board over the configured database, restricted to the configured users.
pub fn open_board() -> Result<(HabitBoard<SqliteStore>, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open(&config.database)?;
    debug!(database = %config.database, users = ?config.users, "board opened");
    Ok((HabitBoard::new(store, config.user_ids()), config))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    habitboard_core::parse_day_key(value).map_err(|e| e.to_string())
}

pub fn parse_user(value: &str) -> Result<UserId, String> {
    let user = UserId::new(value);
    if user.as_str().is_empty() {
        return Err("user must not be empty".into());
    }
    Ok(user)
}
