use clap::{Parser, Subcommand};
use setlog_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "setlog")]
#[command(about = "Personal workout tracking from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new workout (discards any active one)
    Start {
        /// Workout name
        #[arg(long)]
        name: Option<String>,

        /// Workout type (strength, cardio, hiit)
        #[arg(long = "type")]
        workout_type: Option<String>,
    },

    /// Finish the active workout and record it to history
    Finish,

    /// Discard the active workout without recording it
    Cancel,

    /// Replace the active workout's notes
    Note { text: String },

    /// Add an exercise to the active workout
    Add { exercise_id: String },

    /// Add a set to an exercise (by position, 1-based)
    AddSet { exercise: usize },

    /// Remove a set (positions are 1-based)
    RemoveSet { exercise: usize, set: usize },

    /// Update fields of a set (positions are 1-based)
    Set {
        exercise: usize,
        set: usize,

        #[arg(long)]
        reps: Option<u32>,

        #[arg(long)]
        weight: Option<f64>,

        /// Distance in meters (cardio)
        #[arg(long)]
        distance: Option<f64>,

        /// Duration in seconds (cardio)
        #[arg(long)]
        duration: Option<u32>,

        /// Intensity (low, medium, high)
        #[arg(long)]
        intensity: Option<String>,

        /// Mark the set completed
        #[arg(long, conflicts_with = "undone")]
        done: bool,

        /// Mark the set not completed
        #[arg(long, conflicts_with = "done")]
        undone: bool,
    },

    /// Show the active workout
    Status,

    /// List completed workouts, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Manage saved routines
    Routine {
        #[command(subcommand)]
        command: RoutineCommands,
    },

    /// List catalog exercises
    Exercises {
        /// Filter by body area (chest, back, legs, shoulders, arms, core, cardio)
        #[arg(long)]
        area: Option<String>,
    },

    /// Show aggregate statistics
    Stats {
        /// Time window (week, month, year, all)
        #[arg(long)]
        period: Option<String>,
    },

    /// Show the max-weight trend for an exercise
    Progress { exercise_id: String },

    /// Show the most recent performance of an exercise
    Last { exercise_id: String },

    /// Export history to CSV, one row per set
    Export { path: PathBuf },
}

#[derive(Subcommand)]
enum RoutineCommands {
    /// Save the active workout's shape as a routine
    Save { name: String },

    /// Start a workout from a saved routine
    Start { id: Uuid },

    /// Delete a saved routine
    Delete { id: Uuid },

    /// List saved routines
    List,
}

fn main() -> Result<()> {
    setlog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Other("Invalid catalog".into()));
    }

    let mut store = SessionStore::open(FileStore::new(&data_dir))?;

    match cli.command {
        Commands::Start { name, workout_type } => {
            let workout_type = workout_type
                .as_deref()
                .map(parse_workout_type)
                .transpose()?
                .unwrap_or_default();
            store.start_workout(name.as_deref().unwrap_or(DEFAULT_WORKOUT_NAME), workout_type)?;
            let active = store.active().expect("just started");
            println!("Started '{}' ({})", active.name, type_label(active.workout_type));
            Ok(())
        }

        Commands::Finish => {
            if store.active().is_none() {
                println!("No active workout.");
                return Ok(());
            }
            store.finish_workout()?;
            println!("✓ Workout recorded to history.");
            Ok(())
        }

        Commands::Cancel => {
            if store.active().is_none() {
                println!("No active workout.");
                return Ok(());
            }
            store.cancel_workout()?;
            println!("Workout discarded.");
            Ok(())
        }

        Commands::Note { text } => {
            if store.active().is_none() {
                println!("No active workout.");
                return Ok(());
            }
            store.update_notes(&text)?;
            println!("Notes updated.");
            Ok(())
        }

        Commands::Add { exercise_id } => {
            if store.active().is_none() {
                println!("No active workout. Run `setlog start` first.");
                return Ok(());
            }
            if catalog.exercise_info(&exercise_id).is_none() {
                eprintln!(
                    "Warning: '{}' is not in the catalog; logging it anyway.",
                    exercise_id
                );
            }
            store.add_exercise(&exercise_id)?;
            println!("Added {}.", catalog.exercise_name(&exercise_id));
            Ok(())
        }

        Commands::AddSet { exercise } => {
            let Some(instance) = resolve_exercise(&store, exercise) else {
                return Ok(());
            };
            store.add_set(instance)?;
            println!("Set added.");
            Ok(())
        }

        Commands::RemoveSet { exercise, set } => {
            let Some((instance, set_id)) = resolve_set(&store, exercise, set) else {
                return Ok(());
            };
            store.remove_set(instance, set_id)?;
            println!("Set removed.");
            Ok(())
        }

        Commands::Set {
            exercise,
            set,
            reps,
            weight,
            distance,
            duration,
            intensity,
            done,
            undone,
        } => {
            let Some((instance, set_id)) = resolve_set(&store, exercise, set) else {
                return Ok(());
            };
            let intensity = intensity.as_deref().map(parse_intensity).transpose()?;
            let completed = if done {
                Some(true)
            } else if undone {
                Some(false)
            } else {
                None
            };
            store.update_set(
                instance,
                set_id,
                SetPatch {
                    reps,
                    weight,
                    distance,
                    duration,
                    intensity,
                    completed,
                },
            )?;
            println!("Set updated.");
            Ok(())
        }

        Commands::Status => {
            display_status(&store, catalog, &config);
            Ok(())
        }

        Commands::History { limit } => {
            display_history(&store, limit);
            Ok(())
        }

        Commands::Routine { command } => match command {
            RoutineCommands::Save { name } => {
                if store.active().is_none() {
                    println!("No active workout to save as a routine.");
                    return Ok(());
                }
                store.save_routine(&name)?;
                let routine = store.routines().last().expect("just saved");
                println!("✓ Saved routine '{}' ({})", routine.name, routine.id);
                Ok(())
            }
            RoutineCommands::Start { id } => {
                if store.routines().iter().all(|r| r.id != id) {
                    println!("Unknown routine: {}", id);
                    return Ok(());
                }
                store.start_routine(id)?;
                let active = store.active().expect("just started");
                println!(
                    "Started '{}' with {} exercises.",
                    active.name,
                    active.exercises.len()
                );
                Ok(())
            }
            RoutineCommands::Delete { id } => {
                if store.routines().iter().all(|r| r.id != id) {
                    println!("Unknown routine: {}", id);
                    return Ok(());
                }
                store.delete_routine(id)?;
                println!("Routine deleted.");
                Ok(())
            }
            RoutineCommands::List => {
                if store.routines().is_empty() {
                    println!("No saved routines.");
                    return Ok(());
                }
                for routine in store.routines() {
                    let shape: Vec<String> = routine
                        .exercises
                        .iter()
                        .map(|e| format!("{} ×{}", catalog.exercise_name(&e.exercise_id), e.sets))
                        .collect();
                    println!("{}  {}  [{}]", routine.id, routine.name, shape.join(", "));
                }
                Ok(())
            }
        },

        Commands::Exercises { area } => {
            let area = area.as_deref().map(parse_body_area).transpose()?;
            for exercise in catalog.exercises() {
                if let Some(area) = area {
                    if exercise.body_area != area {
                        continue;
                    }
                }
                println!(
                    "{:24} {:10} {}",
                    exercise.id,
                    format!("{:?}", exercise.body_area),
                    exercise.name
                );
            }
            Ok(())
        }

        Commands::Stats { period } => {
            let period = period
                .as_deref()
                .map(parse_period)
                .transpose()?
                .unwrap_or(Period::Month);
            display_stats(&store, period, &config);
            Ok(())
        }

        Commands::Progress { exercise_id } => {
            let points = exercise_progress(store.history(), &exercise_id);
            if points.is_empty() {
                println!("No completed sets recorded for {}.", exercise_id);
                return Ok(());
            }
            println!("Max weight for {}:", catalog.exercise_name(&exercise_id));
            for point in points {
                println!("  {:8} {:.1} {}", point.date, point.max_weight, config.display.weight_unit);
            }
            Ok(())
        }

        Commands::Last { exercise_id } => {
            match last_performance(store.history(), &exercise_id) {
                Some(perf) => println!(
                    "{}: {:.1} {} × {} ({})",
                    catalog.exercise_name(&exercise_id),
                    perf.weight,
                    config.display.weight_unit,
                    perf.reps,
                    perf.date
                ),
                None => println!("No recorded performance for {}.", exercise_id),
            }
            Ok(())
        }

        Commands::Export { path } => {
            let rows = export_history_csv(store.history(), catalog, &path)?;
            println!("✓ Exported {} set rows to {}", rows, path.display());
            Ok(())
        }
    }
}

// ----------------------------------------------------------------------
// Argument parsing helpers
// ----------------------------------------------------------------------

fn parse_workout_type(value: &str) -> Result<WorkoutType> {
    match value.to_lowercase().as_str() {
        "strength" => Ok(WorkoutType::Strength),
        "cardio" => Ok(WorkoutType::Cardio),
        "hiit" => Ok(WorkoutType::Hiit),
        other => Err(Error::Other(format!(
            "Unknown workout type: {} (expected strength, cardio, or hiit)",
            other
        ))),
    }
}

fn parse_intensity(value: &str) -> Result<CardioIntensity> {
    match value.to_lowercase().as_str() {
        "low" => Ok(CardioIntensity::Low),
        "medium" => Ok(CardioIntensity::Medium),
        "high" => Ok(CardioIntensity::High),
        other => Err(Error::Other(format!(
            "Unknown intensity: {} (expected low, medium, or high)",
            other
        ))),
    }
}

fn parse_period(value: &str) -> Result<Period> {
    match value.to_lowercase().as_str() {
        "week" => Ok(Period::Week),
        "month" => Ok(Period::Month),
        "year" => Ok(Period::Year),
        "all" => Ok(Period::All),
        other => Err(Error::Other(format!(
            "Unknown period: {} (expected week, month, year, or all)",
            other
        ))),
    }
}

fn parse_body_area(value: &str) -> Result<BodyArea> {
    match value.to_lowercase().as_str() {
        "chest" => Ok(BodyArea::Chest),
        "back" => Ok(BodyArea::Back),
        "legs" => Ok(BodyArea::Legs),
        "shoulders" => Ok(BodyArea::Shoulders),
        "arms" => Ok(BodyArea::Arms),
        "core" => Ok(BodyArea::Core),
        "cardio" => Ok(BodyArea::Cardio),
        other => Err(Error::Other(format!("Unknown body area: {}", other))),
    }
}

fn type_label(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Strength => "STRENGTH",
        WorkoutType::Cardio => "CARDIO",
        WorkoutType::Hiit => "HIIT",
    }
}

// ----------------------------------------------------------------------
// Position resolution (1-based, CLI-facing)
// ----------------------------------------------------------------------

fn resolve_exercise(store: &SessionStore<FileStore>, position: usize) -> Option<Uuid> {
    let Some(active) = store.active() else {
        println!("No active workout.");
        return None;
    };
    match position.checked_sub(1).and_then(|i| active.exercises.get(i)) {
        Some(exercise) => Some(exercise.id),
        None => {
            println!(
                "No exercise at position {} (workout has {}).",
                position,
                active.exercises.len()
            );
            None
        }
    }
}

fn resolve_set(
    store: &SessionStore<FileStore>,
    exercise_position: usize,
    set_position: usize,
) -> Option<(Uuid, Uuid)> {
    let instance = resolve_exercise(store, exercise_position)?;
    let active = store.active()?;
    let exercise = active.exercises.iter().find(|e| e.id == instance)?;
    match set_position.checked_sub(1).and_then(|i| exercise.sets.get(i)) {
        Some(set) => Some((instance, set.id)),
        None => {
            println!(
                "No set at position {} (exercise has {}).",
                set_position,
                exercise.sets.len()
            );
            None
        }
    }
}

// ----------------------------------------------------------------------
// Display
// ----------------------------------------------------------------------

fn display_status(store: &SessionStore<FileStore>, catalog: &Catalog, config: &Config) {
    let Some(active) = store.active() else {
        println!("No active workout.");
        return;
    };

    println!(
        "{} ({}) — started {}",
        active.name,
        type_label(active.workout_type),
        active.start_time.with_timezone(&chrono::Local).format("%H:%M")
    );
    if let Some(notes) = &active.notes {
        println!("Notes: {}", notes);
    }

    if active.exercises.is_empty() {
        println!("  (no exercises yet)");
        return;
    }

    for (i, exercise) in active.exercises.iter().enumerate() {
        println!("  {}. {}", i + 1, catalog.exercise_name(&exercise.exercise_id));
        for (j, set) in exercise.sets.iter().enumerate() {
            let mark = if set.completed { "✓" } else { " " };
            let mut fields = format!("{:.1} {} × {}", set.weight, config.display.weight_unit, set.reps);
            if let Some(distance) = set.distance {
                fields = format!("{:.0} m", distance);
                if let Some(duration) = set.duration {
                    fields.push_str(&format!(" in {} s", duration));
                }
                if let Some(intensity) = set.intensity {
                    fields.push_str(&format!(" ({:?})", intensity));
                }
            }
            println!("     {} set {}: {}", mark, j + 1, fields);
        }
    }
}

fn display_history(store: &SessionStore<FileStore>, limit: usize) {
    if store.history().is_empty() {
        println!("No workouts recorded yet.");
        return;
    }
    for workout in store.history().iter().take(limit) {
        let date = workout
            .start_time
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M");
        println!(
            "{}  {}  ({}, {} exercises)",
            date,
            workout.name,
            type_label(workout.workout_type),
            workout.exercises.len()
        );
    }
}

fn display_stats(store: &SessionStore<FileStore>, period: Period, config: &Config) {
    let history = store.history();
    let now = chrono::Utc::now();

    let frequency = workout_frequency(history, period, now);
    println!("Workouts: {}", frequency.total);
    println!(
        "  strength: {}  cardio: {}  hiit: {}",
        frequency.strength, frequency.cardio, frequency.hiit
    );
    println!(
        "Total volume (all time): {:.1} {}",
        total_volume(history),
        config.display.weight_unit
    );

    let weekly = volume_by_week(history);
    if !weekly.is_empty() {
        println!("Weekly volume:");
        for bucket in weekly {
            println!("  {:8} {:>10.1}", bucket.week, bucket.volume);
        }
    }
}
