#![forbid(unsafe_code)]

//! Core domain model and business logic for the Setlog workout tracker.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, sets, routines)
//! - Static exercise catalog
//! - Session store with write-through persistence
//! - Analytics engine (pure queries over the history log)
//! - Storage substrate, config, and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod storage;
pub mod store;
pub mod analytics;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use storage::{FileStore, MemoryStore, StateStore};
pub use store::{SessionStore, DEFAULT_WORKOUT_NAME};
pub use analytics::{
    exercise_progress, last_performance, total_volume, total_workouts, volume_by_week,
    workout_frequency, LastPerformance, Period, ProgressPoint, WeeklyVolume, WorkoutFrequency,
};
pub use export::export_history_csv;
