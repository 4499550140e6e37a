//! Starter habit lists for a fresh board.

use crate::habit::{ColorTheme, Habit, HabitType, UserId};

use crate::habit::ColorTheme::{Indigo, Peach, Purple, Rose};
use crate::habit::HabitType::{Standard, TwoStep};

const RACHIT: &[(&str, &str, HabitType, ColorTheme)] = &[
    ("gym", "Gym", Standard, Rose),
    ("protein_shake", "Protein Shake", Standard, Peach),
    ("afternoon_meds", "Afternoon Meds", Standard, Indigo),
    ("hair_serum", "Hair Serum", Standard, Purple),
    ("night_meds", "Night Meds", Standard, Rose),
];

const KHUSHI: &[(&str, &str, HabitType, ColorTheme)] = &[
    ("brain_meds_morning", "Brain Meds (Morning)", Standard, Rose),
    ("omega_3", "Omega 3", Standard, Peach),
    ("b_complex", "B Complex", Standard, Indigo),
    ("vitamin_c", "Vitamin C", Standard, Peach),
    ("brain_med_night", "Brain Med (Night)", Standard, Purple),
    ("multivitamin", "Multivitamin", Standard, Indigo),
    ("vitamin_d", "Vitamin D", Standard, Peach),
    ("night_brush", "Night Brush", Standard, Purple),
    ("protein_intake", "Protein Intake", TwoStep, Rose),
];

/// Starter list for `user`, or `None` when there is no preset.
pub fn default_habits(user: &UserId) -> Option<Vec<Habit>> {
    let preset = match user.as_str() {
        "rachit" => RACHIT,
        "khushi" => KHUSHI,
        _ => return None,
    };
    Some(
        preset
            .iter()
            .map(|&(id, name, habit_type, color_theme)| Habit::new(id, name, habit_type, color_theme))
            .collect(),
    )
}
