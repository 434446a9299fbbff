//! Progressive overload trend per exercise
//!
//! Compares the average best-set volume of the most recent sessions with
//! the earliest ones and labels the exercise improving, plateau or declining.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::volume::best_set_volume;
use crate::workout::WorkoutRecord;

/// Change (in percent) beyond which a trend is no longer a plateau
const PLATEAU_BAND_PERCENT: f64 = 5.0;

/// Sessions compared on each side at most
const MAX_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Improving,
    Plateau,
    Declining,
}

impl TrendStatus {
    fn from_change(change_percent: f64) -> Self {
        if change_percent > PLATEAU_BAND_PERCENT {
            TrendStatus::Improving
        } else if change_percent < -PLATEAU_BAND_PERCENT {
            TrendStatus::Declining
        } else {
            TrendStatus::Plateau
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendStatus::Improving => "↑",
            TrendStatus::Plateau => "→",
            TrendStatus::Declining => "↓",
        }
    }
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendStatus::Improving => write!(f, "improving"),
            TrendStatus::Plateau => write!(f, "plateau"),
            TrendStatus::Declining => write!(f, "declining"),
        }
    }
}

/// Trend for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadTrend {
    pub exercise_key: String,
    pub display: String,
    pub status: TrendStatus,
    pub change_percent: f64,
    /// Average best-set volume over the recent window
    pub recent_best: f64,
    /// Average best-set volume over the oldest window
    pub old_best: f64,
}

/// Best-set volume of one exercise in one workout
#[derive(Debug, Clone, Copy)]
struct Session {
    date: NaiveDate,
    /// Position of the workout in the input; ids of unsaved workouts repeat
    workout_index: usize,
    best_volume: f64,
}

struct ExerciseHistory<'a> {
    display: &'a str,
    sessions: Vec<Session>,
}

fn collect_sessions(workouts: &[WorkoutRecord]) -> HashMap<&str, ExerciseHistory<'_>> {
    let mut history: HashMap<&str, ExerciseHistory<'_>> = HashMap::new();

    for (workout_index, workout) in workouts.iter().enumerate() {
        for entry in &workout.exercises {
            let best = best_set_volume(entry);
            if best <= 0.0 {
                continue;
            }

            let exercise = history.entry(entry.key.as_str()).or_insert_with(|| ExerciseHistory {
                display: entry.display_name.as_str(),
                sessions: Vec::new(),
            });

            // the same exercise twice in one workout is still one session
            match exercise.sessions.iter_mut().find(|s| s.workout_index == workout_index) {
                Some(session) => session.best_volume = session.best_volume.max(best),
                None => exercise.sessions.push(Session {
                    date: workout.date,
                    workout_index,
                    best_volume: best,
                }),
            }
        }
    }

    history
}

fn average(values: &[Session]) -> f64 {
    values.iter().map(|s| s.best_volume).sum::<f64>() / values.len() as f64
}

fn classify_sessions(key: &str, history: ExerciseHistory<'_>) -> Option<OverloadTrend> {
    let mut sessions = history.sessions;
    if sessions.len() < 2 {
        return None;
    }
    sessions.sort_by_key(|s| (s.date, s.workout_index));

    let window = MAX_WINDOW.min(sessions.len() / 2);
    let old_best = average(&sessions[..window]);
    let recent_best = average(&sessions[sessions.len() - window..]);
    let change_percent = (recent_best - old_best) / old_best * 100.0;

    Some(OverloadTrend {
        exercise_key: key.to_string(),
        display: history.display.to_string(),
        status: TrendStatus::from_change(change_percent),
        change_percent,
        recent_best,
        old_best,
    })
}

/// Classify every exercise logged in at least two sessions.
///
/// Sorted improving first, then plateau, then declining; within a status
/// the largest change comes first.
pub fn classify_overload(workouts: &[WorkoutRecord]) -> Vec<OverloadTrend> {
    let mut trends: Vec<OverloadTrend> = collect_sessions(workouts)
        .into_iter()
        .filter_map(|(key, history)| classify_sessions(key, history))
        .collect();

    trends.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then_with(|| b.change_percent.total_cmp(&a.change_percent))
            .then_with(|| a.exercise_key.cmp(&b.exercise_key))
    });
    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{exercise, workout};

    /// One workout per best-set volume, oldest first (weight x 1 rep)
    fn history(key: &str, volumes: &[f64]) -> Vec<WorkoutRecord> {
        let n = volumes.len() as i64;
        volumes
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let i = i as i64;
                workout(i + 1, (n - i) * 2, vec![exercise(key, "Chest", &[(*v, 1)])])
            })
            .collect()
    }

    #[test]
    fn test_overload_single_session_omitted() {
        let workouts = history("bench_press", &[800.0]);
        assert!(classify_overload(&workouts).is_empty());
    }

    #[test]
    fn test_overload_improving() {
        let workouts = history("bench_press", &[100.0, 100.0, 120.0, 130.0]);
        let trends = classify_overload(&workouts);

        assert_eq!(trends.len(), 1);
        let t = &trends[0];
        assert_eq!(t.status, TrendStatus::Improving);
        // window = 2: old avg 100, recent avg 125
        assert_eq!(t.old_best, 100.0);
        assert_eq!(t.recent_best, 125.0);
        assert!((t.change_percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_overload_declining() {
        let workouts = history("squat", &[500.0, 480.0, 400.0]);
        let trends = classify_overload(&workouts);
        // window = 1: 500 -> 400
        assert_eq!(trends[0].status, TrendStatus::Declining);
        assert!((trends[0].change_percent + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_overload_plateau_on_equal_averages() {
        let workouts = history("row", &[600.0, 650.0, 600.0]);
        let trends = classify_overload(&workouts);
        assert_eq!(trends[0].status, TrendStatus::Plateau);
        assert_eq!(trends[0].change_percent, 0.0);
    }

    #[test]
    fn test_overload_band_edges() {
        let plateau = classify_overload(&history("row", &[100.0, 104.0]));
        assert_eq!(plateau[0].status, TrendStatus::Plateau);

        let improving = classify_overload(&history("row", &[100.0, 106.0]));
        assert_eq!(improving[0].status, TrendStatus::Improving);
    }

    #[test]
    fn test_overload_window_capped_at_three() {
        // 8 sessions: window = 3, middle sessions ignored
        let workouts = history("deadlift", &[100.0, 100.0, 100.0, 1.0, 1.0, 110.0, 110.0, 110.0]);
        let trends = classify_overload(&workouts);
        assert_eq!(trends[0].old_best, 100.0);
        assert_eq!(trends[0].recent_best, 110.0);
    }

    #[test]
    fn test_overload_uses_best_set_not_total() {
        let workouts = vec![
            workout(1, 10, vec![exercise("curl", "Biceps", &[(10.0, 10), (10.0, 10), (10.0, 10)])]),
            workout(2, 5, vec![exercise("curl", "Biceps", &[(12.0, 10)])]),
        ];
        let trends = classify_overload(&workouts);
        // 100 -> 120, total volume would have dropped instead
        assert_eq!(trends[0].status, TrendStatus::Improving);
    }

    #[test]
    fn test_overload_ignores_sessions_without_working_sets() {
        let workouts = vec![
            workout(1, 10, vec![exercise("curl", "Biceps", &[(10.0, 10)])]),
            workout(2, 5, vec![exercise("curl", "Biceps", &[(0.0, 10)])]),
        ];
        assert!(classify_overload(&workouts).is_empty());
    }

    #[test]
    fn test_overload_merges_repeated_entry() {
        let workouts = vec![
            workout(1, 10, vec![exercise("curl", "Biceps", &[(10.0, 10)])]),
            workout(2, 5, vec![
                exercise("curl", "Biceps", &[(10.0, 10)]),
                exercise("curl", "Biceps", &[(15.0, 10)]),
            ]),
        ];
        let trends = classify_overload(&workouts);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].recent_best, 150.0);
    }

    #[test]
    fn test_overload_unsaved_workouts_are_separate_sessions() {
        let workouts = vec![
            workout(0, 10, vec![exercise("curl", "Biceps", &[(10.0, 10)])]),
            workout(0, 5, vec![exercise("curl", "Biceps", &[(15.0, 10)])]),
        ];
        let trends = classify_overload(&workouts);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].status, TrendStatus::Improving);
        assert_eq!(trends[0].old_best, 100.0);
        assert_eq!(trends[0].recent_best, 150.0);
    }

    #[test]
    fn test_overload_sort_order() {
        let mut workouts = history("declining", &[200.0, 100.0]);
        workouts.extend(history("plateau", &[100.0, 100.0]));
        workouts.extend(history("improving", &[100.0, 200.0]));
        // keep workout ids unique
        for (i, w) in workouts.iter_mut().enumerate() {
            w.id = i as i64 + 1;
        }

        let statuses: Vec<_> = classify_overload(&workouts).iter().map(|t| t.status).collect();
        assert_eq!(statuses, vec![TrendStatus::Improving, TrendStatus::Plateau, TrendStatus::Declining]);
    }

    #[test]
    fn test_trend_status_serialization() {
        assert_eq!(serde_json::to_string(&TrendStatus::Plateau).unwrap(), "\"plateau\"");
        assert_eq!(TrendStatus::Improving.to_string(), "improving");
    }
}
