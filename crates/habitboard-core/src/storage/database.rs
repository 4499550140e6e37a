//! SQLite-backed store.
//!
//! Provides persistent storage for:
//! - Each user's ordered habit list (one JSON document per user)
//! - Check-in log cells keyed by (user, habit, day-key)
//!
//! Log values are stored as their JSON text (`true`, `1`, `2`) so the
//! table reads the same as a synced JSON document would.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use super::subscription::{Subscribers, Subscription};
use super::{data_dir, migrations, HabitStore, LogStore};
use crate::error::{DatabaseError, Result};
use crate::habit::{Habit, UserId};
use crate::log::{HabitLog, LogValue, UserLogs};

pub const DEFAULT_DATABASE_FILE: &str = "habitboard.db";

/// SQLite database holding habit lists and logs.
pub struct SqliteStore {
    conn: Connection,
    log_subscribers: Subscribers<UserLogs>,
    habit_subscribers: Subscribers<Vec<Habit>>,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open `file_name` inside the data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(file_name: &str) -> Result<Self> {
        let path = data_dir()?.join(file_name);
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        info!(path = %path.display(), "opened habit database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests and dry runs).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self {
            conn,
            log_subscribers: Subscribers::new(),
            habit_subscribers: Subscribers::new(),
        })
    }

    fn read_logs(&self, user: &UserId) -> Result<UserLogs> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, day_key, value
             FROM habit_logs
             WHERE user = ?1
             ORDER BY habit_id, day_key",
        )?;
        let rows = stmt.query_map(params![user.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        // A cell outside the value domain reads as absent; the rest of the
        // user's board stays readable.
        let mut logs = UserLogs::new();
        for row in rows {
            let (habit_id, day_key, text) = row?;
            match LogValue::decode(&text) {
                Ok(Some(value)) => {
                    logs.entry(habit_id)
                        .or_insert_with(HabitLog::new)
                        .set(day_key, Some(value));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(%user, %habit_id, %day_key, error = %e, "skipping unreadable log cell");
                }
            }
        }
        Ok(logs)
    }
}

impl LogStore for SqliteStore {
    fn logs(&self, user: &UserId) -> Result<UserLogs> {
        self.read_logs(user)
    }

    fn set_log(
        &self,
        user: &UserId,
        habit_id: &str,
        day_key: &str,
        value: Option<LogValue>,
    ) -> Result<()> {
        match value {
            Some(value) => {
                self.conn.execute(
                    "INSERT OR REPLACE INTO habit_logs (user, habit_id, day_key, value)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![user.as_str(), habit_id, day_key, value.encode()],
                )?;
            }
            None => {
                self.conn.execute(
                    "DELETE FROM habit_logs WHERE user = ?1 AND habit_id = ?2 AND day_key = ?3",
                    params![user.as_str(), habit_id, day_key],
                )?;
            }
        }
        debug!(%user, habit_id, day_key, ?value, "log cell written");

        // The write is already committed; a failed snapshot read only costs
        // this round of notifications.
        if self.log_subscribers.has_listeners(user) {
            match self.read_logs(user) {
                Ok(snapshot) => self.log_subscribers.notify(user, &snapshot),
                Err(e) => warn!(%user, habit_id, error = %e, "log subscribers not notified"),
            }
        }
        Ok(())
    }

    fn subscribe_logs(
        &self,
        user: &UserId,
        callback: Box<dyn Fn(&UserId, &UserLogs) + Send + Sync>,
    ) -> Subscription {
        self.log_subscribers.subscribe(user, callback)
    }
}

impl HabitStore for SqliteStore {
    fn habits(&self, user: &UserId) -> Result<Option<Vec<Habit>>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT habits FROM habit_lists WHERE user = ?1",
                params![user.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set_habits(&self, user: &UserId, habits: &[Habit]) -> Result<()> {
        let json = serde_json::to_string(habits)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO habit_lists (user, habits, updated_at)
             VALUES (?1, ?2, ?3)",
            params![user.as_str(), json, Utc::now().to_rfc3339()],
        )?;
        debug!(%user, count = habits.len(), "habit list written");
        self.habit_subscribers.notify(user, &habits.to_vec());
        Ok(())
    }

    fn subscribe_habits(
        &self,
        user: &UserId,
        callback: Box<dyn Fn(&UserId, &Vec<Habit>) + Send + Sync>,
    ) -> Subscription {
        self.habit_subscribers.subscribe(user, callback)
    }
}
