//! Personal records - the best logged set per exercise

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workout::WorkoutRecord;

/// Maximum number of records in the timeline
pub const PR_TIMELINE_LIMIT: usize = 10;

/// Best set ever logged for an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise_key: String,
    pub display: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
}

impl PersonalRecord {
    /// Heavier wins; at equal weight more reps wins
    fn rank(&self, weight: f64, reps: u32) -> Ordering {
        weight.total_cmp(&self.weight).then(reps.cmp(&self.reps))
    }
}

/// Collect the PR of every exercise that has a working set
fn collect_records(workouts: &[WorkoutRecord]) -> HashMap<&str, PersonalRecord> {
    let mut best: HashMap<&str, PersonalRecord> = HashMap::new();

    for workout in workouts {
        for entry in &workout.exercises {
            for set in entry.working_sets() {
                let (weight, reps) = (set.weight_kg(), set.rep_count());
                let candidate = || PersonalRecord {
                    exercise_key: entry.key.clone(),
                    display: entry.display_name.clone(),
                    weight,
                    reps,
                    date: workout.date,
                };

                match best.get_mut(entry.key.as_str()) {
                    None => {
                        best.insert(entry.key.as_str(), candidate());
                    }
                    Some(current) => match current.rank(weight, reps) {
                        Ordering::Greater => *current = candidate(),
                        // same set again: keep the day it was first reached
                        Ordering::Equal if workout.date < current.date => *current = candidate(),
                        _ => {}
                    },
                }
            }
        }
    }

    best
}

/// One PR per exercise, newest first, capped at [`PR_TIMELINE_LIMIT`]
pub fn compute_pr_timeline(workouts: &[WorkoutRecord]) -> Vec<PersonalRecord> {
    let mut records: Vec<PersonalRecord> = collect_records(workouts).into_values().collect();

    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.exercise_key.cmp(&b.exercise_key))
    });
    records.truncate(PR_TIMELINE_LIMIT);
    records
}

/// PR for a single exercise, if it has any working set
pub fn personal_record_for(workouts: &[WorkoutRecord], exercise_key: &str) -> Option<PersonalRecord> {
    collect_records(workouts).remove(exercise_key)
}
