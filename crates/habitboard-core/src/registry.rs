//! Ordered habit list of one user.
//!
//! The registry is a plain value: it validates and applies add, remove and
//! reorder against the list it holds. Persisting the resulting list is the
//! caller's job (see [`crate::board::HabitBoard`]), always as a whole list.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::habit::{Habit, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRegistry {
    user: UserId,
    habits: Vec<Habit>,
}

impl HabitRegistry {
    pub fn new(user: UserId, habits: Vec<Habit>) -> Self {
        Self { user, habits }
    }

    pub fn empty(user: UserId) -> Self {
        Self::new(user, Vec::new())
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    pub fn position(&self, habit_id: &str) -> Option<usize> {
        self.habits.iter().position(|h| h.id == habit_id)
    }

    /// Append a habit.
    ///
    /// # Errors
    /// `DuplicateId` when the id is already in the list, `InvalidHabitName`
    /// when the name is blank.
    pub fn add(&mut self, habit: Habit) -> Result<(), RegistryError> {
        if habit.name.trim().is_empty() {
            return Err(RegistryError::InvalidHabitName);
        }
        if self.position(&habit.id).is_some() {
            return Err(RegistryError::DuplicateId {
                user: self.user.to_string(),
                id: habit.id,
            });
        }
        self.habits.push(habit);
        Ok(())
    }

    /// Remove a habit and return it. Its log history is untouched.
    pub fn remove(&mut self, habit_id: &str) -> Result<Habit, RegistryError> {
        let index = self.require(habit_id)?;
        Ok(self.habits.remove(index))
    }

    /// Move a habit to `target_index`, shifting the others.
    ///
    /// Indexes past the end move the habit to the last position. Returns
    /// `false` when the habit already sits at the target.
    pub fn reorder(&mut self, habit_id: &str, target_index: usize) -> Result<bool, RegistryError> {
        let from = self.require(habit_id)?;
        let to = target_index.min(self.habits.len() - 1);
        if from == to {
            return Ok(false);
        }
        let habit = self.habits.remove(from);
        self.habits.insert(to, habit);
        Ok(true)
    }

    fn require(&self, habit_id: &str) -> Result<usize, RegistryError> {
        self.position(habit_id).ok_or_else(|| RegistryError::NotFound {
            user: self.user.to_string(),
            id: habit_id.to_string(),
        })
    }
}
