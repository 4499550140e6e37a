//! In-process store.
//!
//! Holds every snapshot in memory behind a lock. Used by tests and by
//! embedders that sync through their own channel.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use super::subscription::{Subscribers, Subscription};
use super::{HabitStore, LogStore};
use crate::error::{CoreError, Result};
use crate::habit::{Habit, UserId};
use crate::log::{HabitLog, LogValue, UserLogs};

#[derive(Default)]
pub struct MemoryStore {
    logs: RwLock<HashMap<UserId, UserLogs>>,
    habits: RwLock<HashMap<UserId, Vec<Habit>>>,
    log_subscribers: Subscribers<UserLogs>,
    habit_subscribers: Subscribers<Vec<Habit>>,
}

fn poisoned() -> CoreError {
    CoreError::Io(std::io::Error::other("memory store lock poisoned"))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for MemoryStore {
    fn logs(&self, user: &UserId) -> Result<UserLogs> {
        let logs = self.logs.read().map_err(|_| poisoned())?;
        Ok(logs.get(user).cloned().unwrap_or_default())
    }

    fn set_log(
        &self,
        user: &UserId,
        habit_id: &str,
        day_key: &str,
        value: Option<LogValue>,
    ) -> Result<()> {
        let snapshot = {
            let mut logs = self.logs.write().map_err(|_| poisoned())?;
            let user_logs = logs.entry(user.clone()).or_default();
            let habit_log = user_logs.entry(habit_id.to_string()).or_insert_with(HabitLog::new);
            habit_log.set(day_key, value);
            if habit_log.is_empty() {
                user_logs.remove(habit_id);
            }
            user_logs.clone()
        };
        debug!(%user, habit_id, day_key, ?value, "log cell written");
        self.log_subscribers.notify(user, &snapshot);
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

impl HabitStore for MemoryStore {
    fn habits(&self, user: &UserId) -> Result<Option<Vec<Habit>>> {
        let habits = self.habits.read().map_err(|_| poisoned())?;
        Ok(habits.get(user).cloned())
    }

    fn set_habits(&self, user: &UserId, habits: &[Habit]) -> Result<()> {
        {
            let mut stored = self.habits.write().map_err(|_| poisoned())?;
            stored.insert(user.clone(), habits.to_vec());
        }
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
