//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitboard"))
        .env("HABITBOARD_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_habit_list_seeds_presets() {
    let dir = tempfile::tempdir().unwrap();
    let habits = run_json(dir.path(), &["habit", "list", "khushi", "--json"]);
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 9);
    assert_eq!(habits[8]["id"], "protein_intake");
    assert_eq!(habits[8]["type"], "two_step");
}

#[test]
fn test_habit_list_text_shows_color_swatch() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["habit", "list", "rachit"]);
    assert_eq!(code, 0);
    let gym = stdout.lines().find(|line| line.contains("gym")).unwrap();
    assert!(gym.contains("rose (#f43f5e)"), "line: {gym}");
}

#[test]
fn test_checkin_toggles_standard_habit() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["--date", "2024-06-10", "checkin", "rachit", "gym"];

    let first = run_json(dir.path(), &args);
    assert_eq!(first["day_key"], "2024-06-10");
    assert_eq!(first["value"], true);
    assert_eq!(first["status"], "complete");

    let second = run_json(dir.path(), &args);
    assert_eq!(second["previous"], true);
    assert_eq!(second["value"], Value::Null);
    assert_eq!(second["status"], "empty");
}

#[test]
fn test_two_step_checkin_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let checkin = ["--date", "2024-06-10", "checkin", "khushi", "protein_intake"];

    assert_eq!(run_json(dir.path(), &checkin)["value"], 1);
    assert_eq!(run_json(dir.path(), &checkin)["value"], 2);

    let report = run_json(
        dir.path(),
        &["--date", "2024-06-11", "stats", "khushi", "--json"],
    );
    assert_eq!(report["month"], "2024-06");
    let protein = report["habits"]
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["habit"]["id"] == "protein_intake")
        .unwrap();
    assert_eq!(protein["streak"], 1);
    assert_eq!(protein["monthly"]["checked_days"], 1);
    assert_eq!(protein["monthly"]["total_days"], 30);
}

#[test]
fn test_habit_add_move_remove() {
    let dir = tempfile::tempdir().unwrap();
    let added = run_json(
        dir.path(),
        &[
            "habit", "add", "rachit", "Cold Shower", "--id", "cold_shower", "--type",
            "two-step", "--color", "indigo",
        ],
    );
    assert_eq!(added["colorTheme"], "indigo");

    let (_, _, code) = run_cli(dir.path(), &["habit", "move", "rachit", "cold_shower", "0"]);
    assert_eq!(code, 0);
    let habits = run_json(dir.path(), &["habit", "list", "rachit", "--json"]);
    assert_eq!(habits[0]["id"], "cold_shower");

    let (_, stderr, code) = run_cli(dir.path(), &["habit", "add", "rachit", "Gym", "--id", "gym"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");

    let (_, _, code) = run_cli(dir.path(), &["habit", "remove", "rachit", "cold_shower"]);
    assert_eq!(code, 0);
    let habits = run_json(dir.path(), &["habit", "list", "rachit", "--json"]);
    assert_eq!(habits.as_array().unwrap().len(), 5);
}

#[test]
fn test_unknown_user_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["checkin", "mallory", "gym"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown user"), "stderr: {stderr}");
}

#[test]
fn test_invalid_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["--date", "2024-6-1", "today", "rachit"]);
    assert_ne!(code, 0);
}

#[test]
fn test_heatmap_marks_today() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["--date", "2024-06-10", "checkin", "rachit", "gym"]);
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["--date", "2024-06-10", "heatmap", "rachit", "gym"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("[10█]"), "stdout: {stdout}");
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "week_start", "monday"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "week_start"]);
    assert_eq!(stdout.trim(), "monday");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "theme"]);
    assert_eq!(code, 1);
}

#[test]
fn test_capitalized_configured_users_are_usable() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "users", "Rachit,Khushi"]);
    assert_eq!(code, 0);

    for spelling in ["Rachit", "rachit"] {
        let habits = run_json(dir.path(), &["habit", "list", spelling, "--json"]);
        assert_eq!(habits.as_array().unwrap().len(), 5);
    }

    let check_in = run_json(dir.path(), &["--date", "2024-06-10", "checkin", "KHUSHI", "omega_3"]);
    assert_eq!(check_in["user"], "khushi");
    assert_eq!(check_in["value"], true);
}

#[test]
fn test_configured_users_gate_the_board() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "users", "rachit,sam"]);
    assert_eq!(code, 0);

    let habits = run_json(dir.path(), &["habit", "list", "sam", "--json"]);
    assert!(habits.as_array().unwrap().is_empty());

    let (_, _, code) = run_cli(dir.path(), &["habit", "list", "khushi"]);
    assert_eq!(code, 1);
}
