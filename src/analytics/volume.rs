//! Lifted volume (tonnage) per set, exercise and workout

use serde::{Deserialize, Serialize};

use crate::workout::{ExerciseEntry, WorkoutRecord};

/// Total lifted mass for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub workout_id: i64,
    pub total_kg: f64,
}

/// Sum of weight x reps over every set of every exercise
pub fn compute_workout_volume(workout: &WorkoutRecord) -> f64 {
    workout.exercises.iter().map(compute_exercise_volume).sum()
}

/// Sum of weight x reps over the sets of one exercise entry
pub fn compute_exercise_volume(entry: &ExerciseEntry) -> f64 {
    entry.sets.iter().map(|s| s.volume()).sum()
}

/// Heaviest single set by weight x reps, 0 when nothing was lifted
pub fn best_set_volume(entry: &ExerciseEntry) -> f64 {
    entry
        .working_sets()
        .map(|s| s.volume())
        .fold(0.0, f64::max)
}

/// One summary per workout, in input order
pub fn volume_summaries(workouts: &[WorkoutRecord]) -> Vec<VolumeSummary> {
    workouts
        .iter()
        .map(|w| VolumeSummary {
            workout_id: w.id,
            total_kg: compute_workout_volume(w),
        })
        .collect()
}
