//! Corruption recovery tests for the setlog binary.
//!
//! These tests verify the system can handle:
//! - Corrupted slot files
//! - Missing files
//! - Recovery by rewriting on the next mutation

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setlog"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_active_workout_slot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::create_dir_all(data_dir).unwrap();

    fs::write(data_dir.join("active_workout.json"), "{ invalid json }}}}").unwrap();

    // Unparsable slot is treated as absent, not a crash
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No active workout."));
}

#[test]
fn test_corrupted_history_slot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("workout_history.json"), "not even json").unwrap();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts recorded yet."));
}

#[test]
fn test_corrupted_routines_slot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("routines.json"), r#"[{"truncated"#).unwrap();

    cli()
        .args(["routine", "list"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved routines."));
}

#[test]
fn test_mutation_rewrites_corrupted_slot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("workout_history.json"), "garbage").unwrap();

    // Finishing a fresh workout replaces the bad history slot
    cli()
        .args(["start", "--name", "Recovery"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
    cli()
        .arg("finish")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recovery"));
}

#[test]
fn test_missing_data_dir_is_created_on_first_write() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("nested").join("data");

    cli()
        .arg("start")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    assert!(data_dir.join("active_workout.json").exists());
}
