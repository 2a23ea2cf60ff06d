//! Session store: single authority over the active workout, the history
//! log, and saved routines.
//!
//! Every mutation is applied in memory and written through to the storage
//! substrate before returning, so the durable copy always mirrors a state
//! the in-memory copy passed through. Precondition failures (no active
//! workout, unknown ids) are silent no-ops; the only error channel is
//! persistence.

use crate::storage::{keys, StateStore};
use crate::types::{
    Routine, RoutineExercise, SetPatch, Workout, WorkoutExercise, WorkoutSet, WorkoutStatus,
    WorkoutType,
};
use crate::Result;
use chrono::Utc;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Name given to workouts started without one
pub const DEFAULT_WORKOUT_NAME: &str = "New Workout";

/// Owns the three top-level collections and mirrors them to storage
pub struct SessionStore<S: StateStore> {
    storage: S,
    active: Option<Workout>,
    history: Vec<Workout>,
    routines: Vec<Routine>,
}

impl<S: StateStore> SessionStore<S> {
    /// Load session state from storage
    ///
    /// Absent slots load as empty. An unparsable payload is logged at WARN
    /// and treated as absent rather than accepted partially.
    pub fn open(storage: S) -> Result<Self> {
        let active = load_slot(&storage, keys::ACTIVE_WORKOUT)?;
        let history: Vec<Workout> = load_slot(&storage, keys::WORKOUT_HISTORY)?.unwrap_or_default();
        let routines: Vec<Routine> = load_slot(&storage, keys::ROUTINES)?.unwrap_or_default();

        tracing::debug!(
            "Opened session store: active={}, history={}, routines={}",
            active.is_some(),
            history.len(),
            routines.len()
        );

        Ok(Self {
            storage,
            active,
            history,
            routines,
        })
    }

    /// The in-progress workout, if any
    pub fn active(&self) -> Option<&Workout> {
        self.active.as_ref()
    }

    /// Completed workouts, newest first
    pub fn history(&self) -> &[Workout] {
        &self.history
    }

    /// Saved routines
    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    // ------------------------------------------------------------------
    // Workout lifecycle
    // ------------------------------------------------------------------

    /// Start a new active workout
    ///
    /// Starting while a workout is already active discards the previous
    /// active workout. This overwrite policy is intentional: an abandoned
    /// session should not block the next one.
    pub fn start_workout(&mut self, name: &str, workout_type: WorkoutType) -> Result<()> {
        if let Some(previous) = &self.active {
            tracing::info!(
                "Discarding active workout '{}' in favour of a new one",
                previous.name
            );
        }
        self.active = Some(Workout::start(name, workout_type, Utc::now()));
        self.persist_active()
    }

    /// Finish the active workout: stamp the end time and move it to the
    /// front of the history log. No-op if nothing is active.
    pub fn finish_workout(&mut self) -> Result<()> {
        let Some(mut workout) = self.active.take() else {
            tracing::debug!("finish_workout: no active workout");
            return Ok(());
        };

        workout.end_time = Some(Utc::now());
        workout.status = WorkoutStatus::Completed;
        tracing::info!("Finished workout '{}'", workout.name);
        self.history.insert(0, workout);

        self.persist_history()?;
        self.persist_active()
    }

    /// Discard the active workout without recording it. No-op if nothing
    /// is active.
    pub fn cancel_workout(&mut self) -> Result<()> {
        if self.active.take().is_none() {
            tracing::debug!("cancel_workout: no active workout");
            return Ok(());
        }
        self.persist_active()
    }

    /// Replace the active workout's notes. No-op if nothing is active.
    pub fn update_notes(&mut self, notes: &str) -> Result<()> {
        let Some(workout) = self.active.as_mut() else {
            tracing::debug!("update_notes: no active workout");
            return Ok(());
        };
        workout.notes = Some(notes.to_string());
        self.persist_active()
    }

    // ------------------------------------------------------------------
    // Exercise and set mutations
    // ------------------------------------------------------------------

    /// Append an exercise instance to the active workout, seeded with one
    /// zeroed set. No-op if nothing is active.
    pub fn add_exercise(&mut self, exercise_id: &str) -> Result<()> {
        let Some(workout) = self.active.as_mut() else {
            tracing::debug!("add_exercise: no active workout");
            return Ok(());
        };
        workout.exercises.push(WorkoutExercise::new(exercise_id));
        self.persist_active()
    }

    /// Append a set to the named exercise instance, pre-filled from its
    /// last set for convenience. No-op if the instance is unknown.
    pub fn add_set(&mut self, exercise_instance_id: Uuid) -> Result<()> {
        let Some(workout) = self.active.as_mut() else {
            tracing::debug!("add_set: no active workout");
            return Ok(());
        };
        let Some(exercise) = workout
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_instance_id)
        else {
            tracing::debug!("add_set: unknown exercise instance {}", exercise_instance_id);
            return Ok(());
        };

        let new_set = match exercise.sets.last() {
            Some(last) => WorkoutSet::seeded_from(last),
            None => WorkoutSet::zeroed(),
        };
        exercise.sets.push(new_set);
        self.persist_active()
    }

    /// Remove the named set. An exercise instance left with zero sets is
    /// removed from the workout entirely.
    pub fn remove_set(&mut self, exercise_instance_id: Uuid, set_id: Uuid) -> Result<()> {
        let Some(workout) = self.active.as_mut() else {
            tracing::debug!("remove_set: no active workout");
            return Ok(());
        };

        for exercise in &mut workout.exercises {
            if exercise.id == exercise_instance_id {
                exercise.sets.retain(|s| s.id != set_id);
            }
        }
        workout.exercises.retain(|e| !e.sets.is_empty());
        self.persist_active()
    }

    /// Merge the given fields into the named set; unspecified fields are
    /// untouched.
    pub fn update_set(
        &mut self,
        exercise_instance_id: Uuid,
        set_id: Uuid,
        patch: SetPatch,
    ) -> Result<()> {
        let Some(workout) = self.active.as_mut() else {
            tracing::debug!("update_set: no active workout");
            return Ok(());
        };
        let Some(set) = workout
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_instance_id)
            .and_then(|e| e.sets.iter_mut().find(|s| s.id == set_id))
        else {
            tracing::debug!("update_set: unknown set {}/{}", exercise_instance_id, set_id);
            return Ok(());
        };

        if let Some(reps) = patch.reps {
            set.reps = reps;
        }
        if let Some(weight) = patch.weight {
            set.weight = weight;
        }
        if let Some(distance) = patch.distance {
            set.distance = Some(distance);
        }
        if let Some(duration) = patch.duration {
            set.duration = Some(duration);
        }
        if let Some(intensity) = patch.intensity {
            set.intensity = Some(intensity);
        }
        if let Some(completed) = patch.completed {
            set.completed = completed;
        }

        self.persist_active()
    }

    // ------------------------------------------------------------------
    // Routines
    // ------------------------------------------------------------------

    /// Snapshot the active workout's exercises and set counts as a new
    /// routine. No-op if nothing is active.
    pub fn save_routine(&mut self, name: &str) -> Result<()> {
        let Some(workout) = &self.active else {
            tracing::debug!("save_routine: no active workout");
            return Ok(());
        };

        let routine = Routine {
            id: Uuid::new_v4(),
            name: name.to_string(),
            exercises: workout
                .exercises
                .iter()
                .map(|e| RoutineExercise {
                    exercise_id: e.exercise_id.clone(),
                    sets: e.sets.len(),
                })
                .collect(),
        };
        tracing::info!(
            "Saved routine '{}' with {} exercises",
            routine.name,
            routine.exercises.len()
        );
        self.routines.push(routine);
        self.persist_routines()
    }

    /// Start a new active workout from a saved routine, pre-populating
    /// each exercise with `max(1, sets)` zeroed sets. No-op if the routine
    /// id is unknown.
    pub fn start_routine(&mut self, routine_id: Uuid) -> Result<()> {
        let Some(routine) = self.routines.iter().find(|r| r.id == routine_id) else {
            tracing::debug!("start_routine: unknown routine {}", routine_id);
            return Ok(());
        };

        let mut workout = Workout::start(&routine.name, WorkoutType::Strength, Utc::now());
        workout.exercises = routine
            .exercises
            .iter()
            .map(|re| WorkoutExercise {
                id: Uuid::new_v4(),
                exercise_id: re.exercise_id.clone(),
                sets: (0..re.sets.max(1)).map(|_| WorkoutSet::zeroed()).collect(),
            })
            .collect();

        self.active = Some(workout);
        self.persist_active()
    }

    /// Remove a routine; no-op if absent.
    pub fn delete_routine(&mut self, routine_id: Uuid) -> Result<()> {
        let before = self.routines.len();
        self.routines.retain(|r| r.id != routine_id);
        if self.routines.len() == before {
            tracing::debug!("delete_routine: unknown routine {}", routine_id);
            return Ok(());
        }
        self.persist_routines()
    }

    // ------------------------------------------------------------------
    // Write-through persistence
    // ------------------------------------------------------------------

    fn persist_active(&mut self) -> Result<()> {
        match &self.active {
            Some(workout) => {
                let payload = serde_json::to_string(workout)?;
                self.storage.set(keys::ACTIVE_WORKOUT, &payload)
            }
            // An empty slot is deleted, not written as null
            None => self.storage.delete(keys::ACTIVE_WORKOUT),
        }
    }

    fn persist_history(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.history)?;
        self.storage.set(keys::WORKOUT_HISTORY, &payload)
    }

    fn persist_routines(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.routines)?;
        self.storage.set(keys::ROUTINES, &payload)
    }
}

/// Load and parse one slot, treating unparsable payloads as absent
fn load_slot<T: DeserializeOwned, S: StateStore>(storage: &S, key: &str) -> Result<Option<T>> {
    let Some(payload) = storage.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&payload) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!("Unparsable payload in slot '{}': {}. Treating as absent.", key, e);
            Ok(None)
        }
    }
}
