//! Board commands.
//!
//! [`HabitBoard`] is the single entry point for mutations: every check-in and
//! registry change goes through one of its methods, which validates against
//! the latest store snapshot, applies the change, and writes it back. Reads
//! (reports, heatmaps) are computed on demand from the same snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checkin::{advance, day_status, DayStatus};
use crate::date::{day_key, WeekStart};
use crate::defaults::default_habits;
use crate::error::{CoreError, RegistryError, Result};
use crate::habit::{generate_id, ColorTheme, Habit, HabitType, UserId};
use crate::log::{log_for, HabitLog, LogValue, UserLogs};
use crate::registry::HabitRegistry;
use crate::stats::{heatmap, user_report, Heatmap, UserReport};
use crate::storage::{HabitStore, LogStore};

/// Input for [`HabitBoard::add_habit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    /// Explicit id; generated from the name when `None`.
    pub id: Option<String>,
    pub name: String,
    pub habit_type: HabitType,
    pub color_theme: ColorTheme,
}

impl NewHabit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, habit_type: HabitType) -> Self {
        self.habit_type = habit_type;
        self
    }

    pub fn with_color(mut self, color_theme: ColorTheme) -> Self {
        self.color_theme = color_theme;
        self
    }
}

/// Outcome of one check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub user: UserId,
    pub habit_id: String,
    pub day_key: String,
    pub previous: Option<LogValue>,
    pub value: Option<LogValue>,
    pub status: DayStatus,
}

/// Habit board over a store implementing both store contracts.
pub struct HabitBoard<S> {
    store: S,
    users: Vec<UserId>,
}

impl<S: LogStore + HabitStore> HabitBoard<S> {
    pub fn new(store: S, users: Vec<UserId>) -> Self {
        Self { store, users }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    fn require_user(&self, user: &UserId) -> Result<()> {
        if self.users.contains(user) {
            Ok(())
        } else {
            Err(CoreError::UnknownUser(user.to_string()))
        }
    }

    /// The user's ordered habit list.
    ///
    /// A list that was never written is seeded from the starter preset for
    /// that user, if one exists, and persisted.
    pub fn habits(&self, user: &UserId) -> Result<Vec<Habit>> {
        self.require_user(user)?;
        if let Some(habits) = self.store.habits(user)? {
            return Ok(habits);
        }
        match default_habits(user) {
            Some(seed) => {
                info!(%user, count = seed.len(), "seeding starter habits");
                self.store.set_habits(user, &seed)?;
                Ok(seed)
            }
            None => Ok(Vec::new()),
        }
    }

    fn registry(&self, user: &UserId) -> Result<HabitRegistry> {
        Ok(HabitRegistry::new(user.clone(), self.habits(user)?))
    }

    fn find_habit(&self, user: &UserId, habit_id: &str) -> Result<Habit> {
        self.registry(user)?
            .get(habit_id)
            .cloned()
            .ok_or_else(|| {
                RegistryError::NotFound {
                    user: user.to_string(),
                    id: habit_id.to_string(),
                }
                .into()
            })
    }

    /// Append a habit to the user's list.
    pub fn add_habit(&self, user: &UserId, new: NewHabit) -> Result<Habit> {
        let mut registry = self.registry(user)?;
        let id = new.id.unwrap_or_else(|| generate_id(&new.name));
        let habit = Habit::new(id, new.name, new.habit_type, new.color_theme);

        registry.add(habit.clone())?;
        self.store.set_habits(user, registry.habits())?;
        info!(%user, habit_id = %habit.id, habit_type = %habit.habit_type, "habit added");
        Ok(habit)
    }

    /// Remove a habit from the user's list. Its logs stay in the store.
    pub fn remove_habit(&self, user: &UserId, habit_id: &str) -> Result<Habit> {
        let mut registry = self.registry(user)?;
        let removed = registry.remove(habit_id)?;
        self.store.set_habits(user, registry.habits())?;
        info!(%user, habit_id, "habit removed");
        Ok(removed)
    }

    /// Move a habit to `target_index`. Returns `false` (and writes nothing)
    /// when it is already there.
    pub fn reorder_habit(&self, user: &UserId, habit_id: &str, target_index: usize) -> Result<bool> {
        let mut registry = self.registry(user)?;
        let moved = registry.reorder(habit_id, target_index)?;
        if moved {
            self.store.set_habits(user, registry.habits())?;
            info!(%user, habit_id, target_index, "habit moved");
        } else {
            debug!(%user, habit_id, target_index, "habit already in place");
        }
        Ok(moved)
    }

    /// Advance today's value for a habit by one check-in and persist it.
    pub fn check_in(&self, user: &UserId, habit_id: &str, today: NaiveDate) -> Result<CheckIn> {
        let habit = self.find_habit(user, habit_id)?;
        let key = day_key(today);

        let previous = self
            .store
            .logs(user)?
            .get(habit_id)
            .and_then(|log| log.get(&key));
        let value = advance(habit.habit_type, previous);

        self.store.set_log(user, habit_id, &key, value)?;
        info!(%user, habit_id, day_key = %key, ?previous, ?value, "checked in");

        Ok(CheckIn {
            user: user.clone(),
            habit_id: habit_id.to_string(),
            day_key: key,
            previous,
            value,
            status: day_status(habit.habit_type, value),
        })
    }

    /// Today's status of every habit on the user's list, in order.
    pub fn today(&self, user: &UserId, today: NaiveDate) -> Result<Vec<(Habit, DayStatus)>> {
        let habits = self.habits(user)?;
        let logs = self.store.logs(user)?;
        Ok(habits
            .into_iter()
            .map(|habit| {
                let value = logs.get(&habit.id).and_then(|log| log.on(today));
                let status = day_status(habit.habit_type, value);
                (habit, status)
            })
            .collect())
    }

    /// Snapshot of all the user's logs, orphaned ones included.
    pub fn logs(&self, user: &UserId) -> Result<UserLogs> {
        self.require_user(user)?;
        self.store.logs(user)
    }

    /// Log of one habit, empty if nothing was recorded.
    pub fn habit_log(&self, user: &UserId, habit_id: &str) -> Result<HabitLog> {
        let logs = self.logs(user)?;
        Ok(log_for(&logs, habit_id).into_owned())
    }

    /// Streaks and consistency for the month containing `reference`.
    pub fn report(&self, user: &UserId, today: NaiveDate, reference: NaiveDate) -> Result<UserReport> {
        let habits = self.habits(user)?;
        let logs = self.store.logs(user)?;
        Ok(user_report(user.as_str(), &habits, &logs, today, reference))
    }

    /// Calendar heatmap of one habit for the month containing `today`.
    pub fn heatmap(
        &self,
        user: &UserId,
        habit_id: &str,
        today: NaiveDate,
        week_start: WeekStart,
    ) -> Result<Heatmap> {
        let habit = self.find_habit(user, habit_id)?;
        let log = self.habit_log(user, habit_id)?;
        Ok(heatmap(&log, habit.habit_type, today, week_start))
    }
}
