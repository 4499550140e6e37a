//! Sparse per-habit, per-day check-in log.
//!
//! A [`HabitLog`] maps day-keys to the value recorded that day. Absent keys
//! mean "not checked in". On the wire a standard habit stores `true` and a
//! two-step habit stores the literal integers `1` and `2`; `null`, `false`
//! and `0` are read back as absent and are never written.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::date::day_key;
use crate::error::{CoreError, Result};

/// Value recorded for one habit on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogValue {
    /// Standard habit done (`true`).
    Done,
    /// Two-step habit, first check-in (`1`).
    Partial,
    /// Two-step habit, second check-in (`2`).
    Complete,
}

impl LogValue {
    /// Encode as the JSON text stored by persistent backends.
    pub fn encode(&self) -> String {
        match self {
            LogValue::Done => "true".to_string(),
            LogValue::Partial => "1".to_string(),
            LogValue::Complete => "2".to_string(),
        }
    }

    /// Decode stored JSON text. Clear sentinels decode to `None`.
    pub fn decode(text: &str) -> Result<Option<LogValue>> {
        let stored: StoredValue = serde_json::from_str(text)
            .map_err(|e| CoreError::InvalidLogValue(format!("{text}: {e}")))?;
        Ok(stored.0)
    }
}

impl Serialize for LogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            LogValue::Done => serializer.serialize_bool(true),
            LogValue::Partial => serializer.serialize_u8(1),
            LogValue::Complete => serializer.serialize_u8(2),
        }
    }
}

impl<'de> Deserialize<'de> for LogValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        StoredValue::deserialize(deserializer)?
            .0
            .ok_or_else(|| de::Error::custom("log value is absent"))
    }
}

/// A stored cell, where the clear sentinels map to `None`.
struct StoredValue(Option<LogValue>);

struct StoredValueVisitor;

impl<'de> Visitor<'de> for StoredValueVisitor {
    type Value = StoredValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("true, 1, 2 or a clear sentinel (null, false, 0)")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<StoredValue, E> {
        Ok(StoredValue(v.then_some(LogValue::Done)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<StoredValue, E> {
        match v {
            0 => Ok(StoredValue(None)),
            1 => Ok(StoredValue(Some(LogValue::Partial))),
            2 => Ok(StoredValue(Some(LogValue::Complete))),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<StoredValue, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<StoredValue, E> {
        Ok(StoredValue(None))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<StoredValue, E> {
        Ok(StoredValue(None))
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<StoredValue, D::Error> {
        deserializer.deserialize_any(StoredValueVisitor)
    }
}

impl<'de> Deserialize<'de> for StoredValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(StoredValueVisitor)
    }
}

/// Day-key to value map for one (user, habit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HabitLog(BTreeMap<String, LogValue>);

impl HabitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value recorded under an exact day-key.
    pub fn get(&self, day_key: &str) -> Option<LogValue> {
        self.0.get(day_key).copied()
    }

    /// Value recorded on `date`.
    pub fn on(&self, date: NaiveDate) -> Option<LogValue> {
        self.get(&day_key(date))
    }

    /// Whether any value is recorded on `date`.
    pub fn is_present(&self, date: NaiveDate) -> bool {
        self.on(date).is_some()
    }

    /// Write or clear a cell, returning the previous value.
    pub fn set(&mut self, day_key: impl Into<String>, value: Option<LogValue>) -> Option<LogValue> {
        let key = day_key.into();
        match value {
            Some(value) => self.0.insert(key, value),
            None => self.0.remove(&key),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in day-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LogValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl<'de> Deserialize<'de> for HabitLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, StoredValue>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(key, stored)| stored.0.map(|value| (key, value)))
                .collect(),
        ))
    }
}

impl<K: Into<String>> FromIterator<(K, LogValue)> for HabitLog {
    fn from_iter<I: IntoIterator<Item = (K, LogValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// All logs of one user, keyed by habit id.
pub type UserLogs = BTreeMap<String, HabitLog>;

/// Log for `habit_id`, or an empty log when none was ever written.
pub fn log_for<'a>(logs: &'a UserLogs, habit_id: &str) -> std::borrow::Cow<'a, HabitLog> {
    match logs.get(habit_id) {
        Some(log) => std::borrow::Cow::Borrowed(log),
        None => std::borrow::Cow::Owned(HabitLog::new()),
    }
}
