//! Integration tests for the board over the SQLite store.
//!
//! Tests the full workflow from habit setup through check-ins to the
//! monthly report, including persistence across reopen and change
//! notifications.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use habitboard_core::{
    ColorTheme, CoreError, DayStatus, HabitBoard, HabitType, LogStore, LogValue, NewHabit,
    RegistryError, SqliteStore, UserId, WeekStart,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn users() -> Vec<UserId> {
    vec![UserId::new("rachit"), UserId::new("khushi")]
}

#[test]
fn test_full_month_workflow() {
    let board = HabitBoard::new(SqliteStore::open_memory().unwrap(), users());
    let khushi = UserId::new("khushi");

    // Seeded preset: protein_intake is the only two-step habit.
    let habits = board.habits(&khushi).unwrap();
    assert_eq!(habits.len(), 9);

    // Three days of omega_3, protein_intake completed once and partial once.
    for day in 8..=10 {
        board.check_in(&khushi, "omega_3", date(2024, 6, day)).unwrap();
    }
    board.check_in(&khushi, "protein_intake", date(2024, 6, 9)).unwrap();
    board.check_in(&khushi, "protein_intake", date(2024, 6, 9)).unwrap();
    board.check_in(&khushi, "protein_intake", date(2024, 6, 10)).unwrap();

    let today = date(2024, 6, 10);
    let report = board.report(&khushi, today, today).unwrap();

    let omega = report.habits.iter().find(|h| h.habit.id == "omega_3").unwrap();
    assert_eq!(omega.streak, 3);
    assert_eq!(omega.monthly.checked_days, 3);
    assert_eq!(omega.monthly.total_days, 30);
    assert_eq!(omega.monthly.percentage, 10);

    let protein = report
        .habits
        .iter()
        .find(|h| h.habit.id == "protein_intake")
        .unwrap();
    assert_eq!(protein.streak, 2);
    assert_eq!(protein.monthly.checked_days, 2);

    // 5 checked of 9 * 30 possible days.
    assert_eq!(report.overall, 2);
    assert_eq!(report.month_label, "June 2024");

    let heatmap = board
        .heatmap(&khushi, "protein_intake", today, WeekStart::Sunday)
        .unwrap();
    let status = |key: &str| heatmap.cells.iter().find(|c| c.day_key == key).unwrap().status;
    assert_eq!(status("2024-06-09"), DayStatus::Complete);
    assert_eq!(status("2024-06-10"), DayStatus::Partial);
    assert_eq!(status("2024-06-11"), DayStatus::Empty);
}

#[test]
fn test_board_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitboard.db");
    let rachit = UserId::new("rachit");

    {
        let board = HabitBoard::new(SqliteStore::open_at(&path).unwrap(), users());
        board
            .add_habit(
                &rachit,
                NewHabit::named("Stretch")
                    .with_id("stretch")
                    .with_color(ColorTheme::Indigo),
            )
            .unwrap();
        board.reorder_habit(&rachit, "stretch", 0).unwrap();
        board.check_in(&rachit, "stretch", date(2024, 6, 10)).unwrap();
    }

    let board = HabitBoard::new(SqliteStore::open_at(&path).unwrap(), users());
    let habits = board.habits(&rachit).unwrap();
    assert_eq!(habits[0].id, "stretch");
    assert_eq!(habits[0].color_theme, ColorTheme::Indigo);
    assert_eq!(habits.len(), 6);

    let log = board.habit_log(&rachit, "stretch").unwrap();
    assert_eq!(log.get("2024-06-10"), Some(LogValue::Done));
}

#[test]
fn test_registry_errors_surface_through_board() {
    let board = HabitBoard::new(SqliteStore::open_memory().unwrap(), users());
    let rachit = UserId::new("rachit");

    let dup = board
        .add_habit(&rachit, NewHabit::named("Gym").with_id("gym"))
        .unwrap_err();
    assert!(matches!(
        dup,
        CoreError::Registry(RegistryError::DuplicateId { .. })
    ));

    let missing = board.remove_habit(&rachit, "yoga").unwrap_err();
    assert!(matches!(
        missing,
        CoreError::Registry(RegistryError::NotFound { .. })
    ));

    let missing = board.reorder_habit(&rachit, "yoga", 0).unwrap_err();
    assert!(missing.is_user_error());

    let blank = board
        .add_habit(&rachit, NewHabit::named("  ").with_type(HabitType::TwoStep))
        .unwrap_err();
    assert!(matches!(
        blank,
        CoreError::Registry(RegistryError::InvalidHabitName)
    ));
}

#[test]
fn test_check_in_notifies_log_subscribers() {
    let board = HabitBoard::new(SqliteStore::open_memory().unwrap(), users());
    let rachit = UserId::new("rachit");
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let sub = board.store().subscribe_logs(
        &rachit,
        Box::new(move |_, logs| {
            let value = logs.get("gym").and_then(|log| log.get("2024-06-10"));
            sink.lock().unwrap().push(value);
        }),
    );

    board.check_in(&rachit, "gym", date(2024, 6, 10)).unwrap();
    board.check_in(&rachit, "gym", date(2024, 6, 10)).unwrap();
    sub.unsubscribe();
    board.check_in(&rachit, "gym", date(2024, 6, 10)).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![Some(LogValue::Done), None]);
}

#[test]
fn test_logs_of_other_user_are_isolated() {
    let board = HabitBoard::new(SqliteStore::open_memory().unwrap(), users());
    board
        .check_in(&UserId::new("rachit"), "gym", date(2024, 6, 10))
        .unwrap();
    assert!(board.logs(&UserId::new("khushi")).unwrap().is_empty());
}

#[test]
fn test_corrupt_orphaned_cell_leaves_board_usable() {
    let store = SqliteStore::open_memory().unwrap();
    store
        .conn()
        .execute(
            "INSERT INTO habit_logs VALUES ('rachit', 'old_habit', '2023-01-01', '3')",
            [],
        )
        .unwrap();
    let board = HabitBoard::new(store, users());
    let rachit = UserId::new("rachit");
    let today = date(2024, 6, 10);

    let check_in = board.check_in(&rachit, "gym", today).unwrap();
    assert_eq!(check_in.value, Some(LogValue::Done));

    let report = board.report(&rachit, today, today).unwrap();
    let gym = report.habits.iter().find(|h| h.habit.id == "gym").unwrap();
    assert_eq!(gym.streak, 1);
}
