//! Integration tests for the setlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - The start / log / finish workflow
//! - Routine save and reuse
//! - Analytics output over recorded history
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setlog"))
}

fn run(data_dir: &std::path::Path, args: &[&str]) -> assert_cmd::assert::Assert {
    cli().args(args).arg("--data-dir").arg(data_dir).assert()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal workout tracking from the command line",
        ));
}

#[test]
fn test_status_without_active_workout() {
    let temp_dir = setup_test_dir();
    run(temp_dir.path(), &["status"])
        .success()
        .stdout(predicate::str::contains("No active workout."));
}

#[test]
fn test_start_creates_active_workout_slot() {
    let temp_dir = setup_test_dir();

    run(temp_dir.path(), &["start", "--name", "Morning Push"])
        .success()
        .stdout(predicate::str::contains("Started 'Morning Push' (STRENGTH)"));

    assert!(temp_dir.path().join("active_workout.json").exists());

    run(temp_dir.path(), &["status"])
        .success()
        .stdout(predicate::str::contains("Morning Push"));
}

#[test]
fn test_full_workout_flow_feeds_analytics() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    run(dir, &["start", "--name", "Bench Day"]).success();
    run(dir, &["add", "bench_press"]).success();
    run(
        dir,
        &[
            "set", "1", "1", "--reps", "10", "--weight", "100", "--done",
        ],
    )
    .success();
    run(dir, &["finish"])
        .success()
        .stdout(predicate::str::contains("recorded to history"));

    // Active slot cleared, history written
    assert!(!dir.join("active_workout.json").exists());
    assert!(dir.join("workout_history.json").exists());

    run(dir, &["history"])
        .success()
        .stdout(predicate::str::contains("Bench Day"));

    run(dir, &["stats", "--period", "week"])
        .success()
        .stdout(predicate::str::contains("Workouts: 1"))
        .stdout(predicate::str::contains("1000.0"));

    run(dir, &["last", "bench_press"])
        .success()
        .stdout(predicate::str::contains("100.0"))
        .stdout(predicate::str::contains("× 10"));

    run(dir, &["progress", "bench_press"])
        .success()
        .stdout(predicate::str::contains("100.0"));
}

#[test]
fn test_cancel_discards_workout() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    run(dir, &["start"]).success();
    run(dir, &["cancel"])
        .success()
        .stdout(predicate::str::contains("discarded"));

    run(dir, &["history"])
        .success()
        .stdout(predicate::str::contains("No workouts recorded yet."));
}

#[test]
fn test_cardio_workout_fields() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    run(dir, &["start", "--name", "Easy Run", "--type", "cardio"])
        .success()
        .stdout(predicate::str::contains("(CARDIO)"));
    run(dir, &["add", "running"]).success();
    run(
        dir,
        &[
            "set",
            "1",
            "1",
            "--distance",
            "5000",
            "--duration",
            "1500",
            "--intensity",
            "medium",
            "--done",
        ],
    )
    .success();

    run(dir, &["status"])
        .success()
        .stdout(predicate::str::contains("Running"))
        .stdout(predicate::str::contains("5000 m"));
}

#[test]
fn test_remove_last_set_removes_exercise() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    run(dir, &["start"]).success();
    run(dir, &["add", "squat"]).success();
    run(dir, &["remove-set", "1", "1"]).success();

    run(dir, &["status"])
        .success()
        .stdout(predicate::str::contains("no exercises yet"));
}

#[test]
fn test_routine_save_and_start() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    run(dir, &["start", "--name", "Push Day"]).success();
    run(dir, &["add", "bench_press"]).success();
    run(dir, &["add-set", "1"]).success();
    run(dir, &["add-set", "1"]).success();
    run(dir, &["add", "overhead_press"]).success();
    run(dir, &["add-set", "2"]).success();

    let output = cli()
        .args(["routine", "save", "Push Day"])
        .arg("--data-dir")
        .arg(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let routine_id = stdout
        .split('(')
        .nth(1)
        .and_then(|s| s.split(')').next())
        .expect("routine id in output")
        .to_string();

    run(dir, &["finish"]).success();

    run(dir, &["routine", "list"])
        .success()
        .stdout(predicate::str::contains("Push Day"))
        .stdout(predicate::str::contains("Bench Press ×3"))
        .stdout(predicate::str::contains("Overhead Press ×2"));

    run(dir, &["routine", "start", &routine_id])
        .success()
        .stdout(predicate::str::contains("with 2 exercises"));

    run(dir, &["status"])
        .success()
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("set 3"));

    run(dir, &["cancel"]).success();
    run(dir, &["routine", "delete", &routine_id])
        .success()
        .stdout(predicate::str::contains("Routine deleted."));
    run(dir, &["routine", "list"])
        .success()
        .stdout(predicate::str::contains("No saved routines."));
}

#[test]
fn test_unknown_routine_is_reported() {
    let temp_dir = setup_test_dir();
    run(
        temp_dir.path(),
        &["routine", "start", "00000000-0000-0000-0000-000000000000"],
    )
    .success()
    .stdout(predicate::str::contains("Unknown routine"));
}

#[test]
fn test_exercises_listing() {
    let temp_dir = setup_test_dir();

    run(temp_dir.path(), &["exercises", "--area", "legs"])
        .success()
        .stdout(predicate::str::contains("Squat"))
        .stdout(predicate::str::contains("Leg Press"))
        .stdout(predicate::str::contains("Lunges"));
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let csv_path = dir.join("out").join("history.csv");

    run(dir, &["start"]).success();
    run(dir, &["add", "deadlift"]).success();
    run(dir, &["set", "1", "1", "--reps", "5", "--weight", "140", "--done"]).success();
    run(dir, &["finish"]).success();

    run(dir, &["export", csv_path.to_str().unwrap()])
        .success()
        .stdout(predicate::str::contains("Exported 1 set rows"));

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    assert!(contents.contains("Deadlift"));
    assert!(contents.contains("140"));
}

#[test]
fn test_set_position_out_of_range() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    run(dir, &["start"]).success();
    run(dir, &["add-set", "3"])
        .success()
        .stdout(predicate::str::contains("No exercise at position 3"));
}
