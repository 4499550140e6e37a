//! Habit definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Owner of a habit list and its logs.
///
/// Ids are trimmed and lowercased on construction, so `Rachit` in the config
/// and `rachit` on the command line name the same user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(UserId::new)
    }
}

impl UserId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How a habit is checked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitType {
    /// One check-in toggles done / not done.
    #[default]
    Standard,
    /// Two check-ins per day to complete; partial after the first.
    TwoStep,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Standard => "standard",
            HabitType::TwoStep => "two_step",
        }
    }

    /// One-line hint shown next to the check-in control.
    pub fn hint(&self) -> &'static str {
        match self {
            HabitType::Standard => "One click to complete for the day.",
            HabitType::TwoStep => "Needs 2 check-ins daily.",
        }
    }
}

impl FromStr for HabitType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(HabitType::Standard),
            // "protein" is the name older boards stored for two-step habits.
            "two_step" | "two-step" | "protein" => Ok(HabitType::TwoStep),
            other => Err(CoreError::InvalidHabitType(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for HabitType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accent color of a habit card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Rose,
    Peach,
    Purple,
    Indigo,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 4] = [
        ColorTheme::Rose,
        ColorTheme::Peach,
        ColorTheme::Purple,
        ColorTheme::Indigo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Rose => "rose",
            ColorTheme::Peach => "peach",
            ColorTheme::Purple => "purple",
            ColorTheme::Indigo => "indigo",
        }
    }

    /// Hex swatch used by text renderers.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorTheme::Rose => "#f43f5e",
            ColorTheme::Peach => "#fb923c",
            ColorTheme::Purple => "#a855f7",
            ColorTheme::Indigo => "#6366f1",
        }
    }
}

impl FromStr for ColorTheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| CoreError::InvalidColorTheme(s.to_string()))
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A habit definition in a user's ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub habit_type: HabitType,
    #[serde(default)]
    pub color_theme: ColorTheme,
}

impl Habit {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        habit_type: HabitType,
        color_theme: ColorTheme,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            habit_type,
            color_theme,
        }
    }
}

/// Build a habit id from its display name: lowercase, whitespace runs
/// collapsed to `_`, then `_` and `suffix`.
pub fn slug_id(name: &str, suffix: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    format!("{slug}_{suffix}")
}

/// A fresh habit id with a short random suffix.
pub fn generate_id(name: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    slug_id(name, &suffix[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_case_insensitive() {
        assert_eq!(UserId::new(" Rachit "), UserId::new("rachit"));
        assert_eq!(UserId::from("KHUSHI").as_str(), "khushi");

        let parsed: UserId = serde_json::from_str("\"Khushi\"").unwrap();
        assert_eq!(parsed, UserId::new("khushi"));
    }

    #[test]
    fn habit_json_uses_board_field_names() {
        let habit = Habit::new("gym", "Gym", HabitType::Standard, ColorTheme::Rose);
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "gym",
                "name": "Gym",
                "type": "standard",
                "colorTheme": "rose"
            })
        );
    }

    #[test]
    fn legacy_protein_type_reads_as_two_step() {
        let habit: Habit = serde_json::from_str(
            r#"{"id":"protein_intake","name":"Protein Intake","type":"protein","colorTheme":"rose"}"#,
        )
        .unwrap();
        assert_eq!(habit.habit_type, HabitType::TwoStep);

        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["type"], "two_step");
    }

    #[test]
    fn unknown_habit_type_fails_to_parse() {
        let err = "weekly".parse::<HabitType>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidHabitType(ref t) if t == "weekly"));

        let result = serde_json::from_str::<Habit>(
            r#"{"id":"x","name":"X","type":"weekly","colorTheme":"rose"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn color_theme_round_trips_through_str() {
        for theme in ColorTheme::ALL {
            assert_eq!(theme.as_str().parse::<ColorTheme>().unwrap(), theme);
        }
        assert!("teal".parse::<ColorTheme>().is_err());
    }

    #[test]
    fn slug_id_collapses_whitespace() {
        assert_eq!(slug_id("Read  10 Pages", "1234"), "read_10_pages_1234");
        assert_eq!(slug_id(" Gym ", "ab12"), "gym_ab12");
    }

    #[test]
    fn generated_id_keeps_slug_prefix() {
        let id = generate_id("Night Brush");
        assert!(id.starts_with("night_brush_"));
        assert_eq!(id.len(), "night_brush_".len() + 4);
    }
}
