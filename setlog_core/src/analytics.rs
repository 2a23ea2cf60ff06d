//! Analytics engine: pure query functions over the workout history.
//!
//! Every function here is stateless and side-effect free; reports are fully
//! recomputed on each call. Functions that filter by a time window take
//! `now` explicitly so callers (and tests) control the reference point.
//!
//! Numeric semantics: volume math is plain f64 multiply/sum, and a zero
//! weight or rep count disqualifies a set, so bodyweight sets logged with
//! `weight = 0` never contribute.

use crate::types::{Workout, WorkoutType};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Number of buckets kept by [`volume_by_week`]
const WEEKLY_CHART_BUCKETS: usize = 8;

/// Time window for frequency and count queries, measured as a fixed
/// duration back from "now" rather than calendar-aligned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
    All,
}

impl Period {
    fn window(self) -> Option<Duration> {
        match self {
            Period::Week => Some(Duration::days(7)),
            Period::Month => Some(Duration::days(30)),
            Period::Year => Some(Duration::days(365)),
            Period::All => None,
        }
    }

    fn contains(self, start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.window() {
            Some(window) => now - start_time <= window,
            None => true,
        }
    }
}

/// Most recent qualifying performance of an exercise
#[derive(Clone, Debug, PartialEq)]
pub struct LastPerformance {
    pub weight: f64,
    pub reps: u32,
    pub date: String,
}

/// One bucket of the weekly volume chart
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyVolume {
    pub week: String,
    pub volume: f64,
}

/// Workout counts within a period, broken down by type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkoutFrequency {
    pub total: usize,
    pub strength: usize,
    pub cardio: usize,
    pub hiit: usize,
}

/// One point of an exercise's max-weight trend
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressPoint {
    pub date: String,
    pub max_weight: f64,
}

/// Localized short month/day label, e.g. "Aug 24"
fn short_date(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%b %-d").to_string()
}

/// Sunday-aligned start of the workout's calendar week, local time
fn week_start(time: DateTime<Utc>) -> NaiveDate {
    let date = time.with_timezone(&Local).date_naive();
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Most recent performance of an exercise, scanning the history in caller
/// order (conventionally newest first)
///
/// Returns the heaviest completed set with positive weight and reps from the
/// first workout containing one; ties go to the earlier set. Returns `None`
/// when no workout qualifies. This is "most recent performance", not "best
/// ever": the scan stops at the first qualifying workout.
pub fn last_performance(history: &[Workout], exercise_id: &str) -> Option<LastPerformance> {
    for workout in history {
        let Some(exercise) = workout.exercises.iter().find(|e| e.exercise_id == exercise_id)
        else {
            continue;
        };

        let best = exercise
            .sets
            .iter()
            .filter(|s| s.completed && s.weight > 0.0 && s.reps > 0)
            .reduce(|best, current| if current.weight > best.weight { current } else { best });

        if let Some(best) = best {
            return Some(LastPerformance {
                weight: best.weight,
                reps: best.reps,
                date: short_date(workout.start_time),
            });
        }
    }
    None
}

/// Total volume (weight × reps over qualifying sets) across all workouts
pub fn total_volume(workouts: &[Workout]) -> f64 {
    workouts.iter().map(workout_volume).sum()
}

fn workout_volume(workout: &Workout) -> f64 {
    workout
        .exercises
        .iter()
        .flat_map(|e| &e.sets)
        .map(|s| s.volume())
        .sum()
}

/// Volume bucketed by Sunday-aligned week start, ascending, truncated to
/// the most recent buckets
///
/// Every workout contributes a bucket, so weeks containing only
/// zero-volume workouts still appear with volume 0.
pub fn volume_by_week(workouts: &[Workout]) -> Vec<WeeklyVolume> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for workout in workouts {
        *buckets.entry(week_start(workout.start_time)).or_insert(0.0) += workout_volume(workout);
    }

    let skip = buckets.len().saturating_sub(WEEKLY_CHART_BUCKETS);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(week, volume)| WeeklyVolume {
            week: week.format("%b %-d").to_string(),
            volume,
        })
        .collect()
}

/// Workout counts within the period, broken down by type
pub fn workout_frequency(
    workouts: &[Workout],
    period: Period,
    now: DateTime<Utc>,
) -> WorkoutFrequency {
    let mut frequency = WorkoutFrequency::default();
    for workout in workouts {
        if !period.contains(workout.start_time, now) {
            continue;
        }
        frequency.total += 1;
        match workout.workout_type {
            WorkoutType::Strength => frequency.strength += 1,
            WorkoutType::Cardio => frequency.cardio += 1,
            WorkoutType::Hiit => frequency.hiit += 1,
        }
    }
    frequency
}

/// Max-weight trend for an exercise, ascending by workout start time
///
/// A workout contributes one point: the maximum weight among its completed
/// sets with positive weight (reps are not required). Workouts without a
/// qualifying set are omitted entirely, never reported as zero.
pub fn exercise_progress(workouts: &[Workout], exercise_id: &str) -> Vec<ProgressPoint> {
    let mut points: Vec<(DateTime<Utc>, ProgressPoint)> = Vec::new();

    for workout in workouts {
        let Some(exercise) = workout.exercises.iter().find(|e| e.exercise_id == exercise_id)
        else {
            continue;
        };

        let max_weight = exercise
            .sets
            .iter()
            .filter(|s| s.completed && s.weight > 0.0)
            .map(|s| s.weight)
            .fold(f64::NEG_INFINITY, f64::max);

        if max_weight.is_finite() {
            points.push((
                workout.start_time,
                ProgressPoint {
                    date: short_date(workout.start_time),
                    max_weight,
                },
            ));
        }
    }

    // Stable sort keeps input order for equal timestamps
    points.sort_by_key(|(start_time, _)| *start_time);
    points.into_iter().map(|(_, point)| point).collect()
}

/// Count workouts, optionally restricted to a type and a period
pub fn total_workouts(
    workouts: &[Workout],
    workout_type: Option<WorkoutType>,
    period: Period,
    now: DateTime<Utc>,
) -> usize {
    workouts
        .iter()
        .filter(|w| period.contains(w.start_time, now))
        .filter(|w| workout_type.map_or(true, |t| w.workout_type == t))
        .count()
}
