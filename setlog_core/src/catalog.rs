//! Static exercise catalog.
//!
//! This module provides the built-in exercises the tracker knows about,
//! grouped by body area, with cardio entries flagged.

use crate::types::{BodyArea, Exercise};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Sentinel name returned for unknown exercise ids
pub const UNKNOWN_EXERCISE: &str = "Unknown Exercise";

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// The complete catalog of exercises, with an id index for lookups
#[derive(Clone, Debug)]
pub struct Catalog {
    exercises: Vec<Exercise>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from a list of exercises, preserving order
    pub fn new(exercises: Vec<Exercise>) -> Self {
        let index = exercises
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { exercises, index }
    }

    /// All exercises in catalog order
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Look up a catalog exercise by id
    pub fn exercise_info(&self, id: &str) -> Option<&Exercise> {
        self.index.get(id).map(|&i| &self.exercises[i])
    }

    /// Display name for an exercise id, with a sentinel on miss
    pub fn exercise_name(&self, id: &str) -> &str {
        self.exercise_info(id)
            .map(|e| e.name.as_str())
            .unwrap_or(UNKNOWN_EXERCISE)
    }

    /// Exercises targeting the given body area, in catalog order
    pub fn by_body_area(&self, area: BodyArea) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.body_area == area)
            .collect()
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen = HashMap::new();
        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
            if let Some(previous) = seen.insert(exercise.id.clone(), &exercise.name) {
                errors.push(format!(
                    "Duplicate exercise ID '{}' ('{}' and '{}')",
                    exercise.id, previous, exercise.name
                ));
            }
            if exercise.is_cardio && exercise.body_area != BodyArea::Cardio {
                errors.push(format!(
                    "Cardio exercise '{}' is not in the Cardio body area",
                    exercise.id
                ));
            }
        }

        errors
    }
}

fn strength(id: &str, name: &str, body_area: BodyArea) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        body_area,
        is_cardio: false,
    }
}

fn cardio(id: &str, name: &str) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        body_area: BodyArea::Cardio,
        is_cardio: true,
    }
}

/// Builds the default catalog with the built-in exercises
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference.
pub fn build_default_catalog() -> Catalog {
    Catalog::new(vec![
        // Chest
        strength("bench_press", "Bench Press", BodyArea::Chest),
        strength("push_up", "Push Up", BodyArea::Chest),
        strength(
            "incline_dumbell_press",
            "Incline Dumbbell Press",
            BodyArea::Chest,
        ),
        // Back
        strength("pull_up", "Pull Up", BodyArea::Back),
        strength("deadlift", "Deadlift", BodyArea::Back),
        strength("lat_pulldown", "Lat Pulldown", BodyArea::Back),
        strength("row", "Barbell Row", BodyArea::Back),
        // Legs
        strength("squat", "Squat", BodyArea::Legs),
        strength("leg_press", "Leg Press", BodyArea::Legs),
        strength("lunge", "Lunges", BodyArea::Legs),
        // Shoulders
        strength("overhead_press", "Overhead Press", BodyArea::Shoulders),
        strength("lateral_raise", "Lateral Raise", BodyArea::Shoulders),
        // Arms
        strength("bicep_curl", "Bicep Curl", BodyArea::Arms),
        strength("tricep_dip", "Tricep Dip", BodyArea::Arms),
        // Core
        strength("plank", "Plank", BodyArea::Core),
        strength("crunch", "Crunch", BodyArea::Core),
        // Cardio
        cardio("running", "Running"),
        cardio("cycling", "Cycling"),
        cardio("rowing", "Rowing"),
        cardio("swimming", "Swimming"),
        cardio("elliptical", "Elliptical"),
        cardio("jump_rope", "Jump Rope"),
    ])
}
