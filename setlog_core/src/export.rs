//! CSV export of the workout history.
//!
//! Flattens history into one row per set so the log can be analyzed in a
//! spreadsheet. Export is read-only with respect to session state.

use crate::catalog::Catalog;
use crate::types::Workout;
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    workout_id: String,
    workout_name: String,
    workout_type: String,
    started_at: String,
    ended_at: Option<String>,
    exercise_id: String,
    exercise_name: String,
    set_number: usize,
    reps: u32,
    weight: f64,
    distance: Option<f64>,
    duration: Option<u32>,
    intensity: Option<String>,
    completed: bool,
}

/// Write the full history to a CSV file, one row per set
///
/// Returns the number of rows written. Exercise names are resolved through
/// the catalog; unknown ids get the sentinel name.
pub fn export_history_csv(history: &[Workout], catalog: &Catalog, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for workout in history {
        for exercise in &workout.exercises {
            for (index, set) in exercise.sets.iter().enumerate() {
                writer.serialize(CsvRow {
                    workout_id: workout.id.to_string(),
                    workout_name: workout.name.clone(),
                    workout_type: format!("{:?}", workout.workout_type).to_uppercase(),
                    started_at: workout.start_time.to_rfc3339(),
                    ended_at: workout.end_time.map(|t| t.to_rfc3339()),
                    exercise_id: exercise.exercise_id.clone(),
                    exercise_name: catalog.exercise_name(&exercise.exercise_id).to_string(),
                    set_number: index + 1,
                    reps: set.reps,
                    weight: set.weight,
                    distance: set.distance,
                    duration: set.duration,
                    intensity: set.intensity.map(|i| format!("{:?}", i).to_lowercase()),
                    completed: set.completed,
                })?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} set rows to {:?}", rows, path);
    Ok(rows)
}
