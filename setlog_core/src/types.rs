//! Core domain types for the Setlog workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Catalog exercises and body areas
//! - Workout sets, exercise instances, and workouts
//! - Routines (reusable workout templates)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Catalog Types
// ============================================================================

/// Body area targeted by a catalog exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BodyArea {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
}

/// A static catalog exercise (e.g., "Bench Press")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub body_area: BodyArea,
    #[serde(default)]
    pub is_cardio: bool,
}

// ============================================================================
// Workout Types
// ============================================================================

/// Perceived intensity for cardio sets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardioIntensity {
    Low,
    Medium,
    High,
}

/// Kind of workout session
///
/// A missing type on old persisted records deserializes as `Strength`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutType {
    #[default]
    Strength,
    Cardio,
    Hiit,
}

/// Lifecycle state of a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Active,
    Completed,
}

/// One logged set within an exercise instance
///
/// Strength sets carry `reps`/`weight`; cardio sets carry `distance` (meters),
/// `duration` (seconds), and `intensity`. Zero is treated as "not filled in"
/// by every aggregate, so a bodyweight set logged as `weight = 0` does not
/// count toward volume.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub id: Uuid,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<CardioIntensity>,
    #[serde(default)]
    pub completed: bool,
}

impl WorkoutSet {
    /// A fresh, incomplete set with zeroed values
    pub fn zeroed() -> Self {
        Self {
            id: Uuid::new_v4(),
            reps: 0,
            weight: 0.0,
            distance: None,
            duration: None,
            intensity: None,
            completed: false,
        }
    }

    /// A fresh set pre-filled with the previous set's reps/weight
    pub fn seeded_from(previous: &WorkoutSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            reps: previous.reps,
            weight: previous.weight,
            distance: None,
            duration: None,
            intensity: None,
            completed: false,
        }
    }

    /// Whether this set counts toward volume: completed with positive
    /// weight and reps
    pub fn counts_for_volume(&self) -> bool {
        self.completed && self.weight > 0.0 && self.reps > 0
    }

    /// weight × reps for qualifying sets, 0.0 otherwise
    pub fn volume(&self) -> f64 {
        if self.counts_for_volume() {
            self.weight * self.reps as f64
        } else {
            0.0
        }
    }
}

/// Partial update applied to a set; `None` fields are left untouched
#[derive(Clone, Debug, Default)]
pub struct SetPatch {
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<u32>,
    pub intensity: Option<CardioIntensity>,
    pub completed: Option<bool>,
}

/// One exercise's occurrence within a workout
///
/// The instance `id` is distinct from the catalog `exercise_id` it references.
/// Set order is insertion order (1-indexed for display).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub exercise_id: String,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutExercise {
    /// A new instance referencing a catalog exercise, seeded with one
    /// zeroed set
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.into(),
            sets: vec![WorkoutSet::zeroed()],
        }
    }
}

/// A workout session, either the active one or a history entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub workout_type: WorkoutType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    pub exercises: Vec<WorkoutExercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: WorkoutStatus,
}

impl Workout {
    /// Start a new active workout with an empty exercise list
    pub fn start(name: impl Into<String>, workout_type: WorkoutType, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            workout_type,
            start_time: now,
            end_time: None,
            exercises: Vec::new(),
            notes: None,
            status: WorkoutStatus::Active,
        }
    }
}

// ============================================================================
// Routine Types
// ============================================================================

/// One entry of a routine: which exercise and how many sets to pre-populate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoutineExercise {
    pub exercise_id: String,
    pub sets: usize,
}

/// A reusable workout template (exercise ids and set counts, no targets)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<RoutineExercise>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_workout_serde_roundtrip() {
        let mut workout = Workout::start(
            "Push Day",
            WorkoutType::Strength,
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        );
        let mut exercise = WorkoutExercise::new("bench_press");
        exercise.sets[0].reps = 10;
        exercise.sets[0].weight = 100.0;
        exercise.sets[0].completed = true;
        workout.exercises.push(exercise);
        workout.notes = Some("felt strong".into());

        let json = serde_json::to_string(&workout).unwrap();
        let parsed: Workout = serde_json::from_str(&json).unwrap();
        assert_eq!(workout, parsed);
    }

    #[test]
    fn test_start_time_serialized_as_epoch_millis() {
        let workout = Workout::start(
            "W",
            WorkoutType::Cardio,
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        );
        let value: serde_json::Value = serde_json::to_value(&workout).unwrap();
        assert_eq!(value["start_time"], serde_json::json!(1_700_000_000_000i64));
        assert_eq!(value["type"], serde_json::json!("CARDIO"));
        assert!(value.get("end_time").is_none());
    }

    #[test]
    fn test_missing_type_defaults_to_strength() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Legacy",
            "start_time": 1700000000000,
            "exercises": [],
            "status": "completed"
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.workout_type, WorkoutType::Strength);
    }

    #[test]
    fn test_zero_values_do_not_count_for_volume() {
        let mut set = WorkoutSet::zeroed();
        set.completed = true;
        set.weight = 0.0;
        set.reps = 10;
        assert!(!set.counts_for_volume());
        assert_eq!(set.volume(), 0.0);

        set.weight = 80.0;
        set.reps = 0;
        assert!(!set.counts_for_volume());

        set.reps = 5;
        assert!(set.counts_for_volume());
        assert_eq!(set.volume(), 400.0);

        set.completed = false;
        assert_eq!(set.volume(), 0.0);
    }

    #[test]
    fn test_seeded_set_copies_reps_and_weight_only() {
        let mut previous = WorkoutSet::zeroed();
        previous.reps = 5;
        previous.weight = 80.0;
        previous.completed = true;

        let seeded = WorkoutSet::seeded_from(&previous);
        assert_eq!(seeded.reps, 5);
        assert_eq!(seeded.weight, 80.0);
        assert!(!seeded.completed);
        assert_ne!(seeded.id, previous.id);
    }
}
