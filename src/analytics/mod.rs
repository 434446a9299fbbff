//! Progress analytics - derived views over a workout and body weight log
//!
//! Features:
//! - Training streak
//! - Volume per workout and exercise
//! - Muscle group focus distribution
//! - Personal record timeline
//! - Progressive overload trends
//! - Body weight series for charting
//!
//! Everything here is a pure function of the snapshot it is given.

pub mod muscle_distribution;
pub mod overload;
pub mod pr_timeline;
pub mod streak;
pub mod volume;
pub mod weight_series;

pub use muscle_distribution::{MuscleShare, TimeRange, compute_muscle_distribution};
pub use overload::{OverloadTrend, TrendStatus, classify_overload};
pub use pr_timeline::{PR_TIMELINE_LIMIT, PersonalRecord, compute_pr_timeline, personal_record_for};
pub use streak::{compute_streak, workout_dates};
pub use volume::{VolumeSummary, compute_exercise_volume, compute_workout_volume, volume_summaries};
pub use weight_series::{WeightSeries, prepare_weight_series};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workout::{WeightLogEntry, WorkoutRecord};

/// All views at once, for one user snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub today: NaiveDate,
    pub streak: u32,
    pub volumes: Vec<VolumeSummary>,
    pub muscle_distribution: Vec<MuscleShare>,
    pub range: TimeRange,
    pub personal_records: Vec<PersonalRecord>,
    pub overload: Vec<OverloadTrend>,
    pub weight_series: WeightSeries,
}

/// Training analytics over one snapshot
pub struct Analytics {
    workouts: Vec<WorkoutRecord>,
    weight_log: Vec<WeightLogEntry>,
    today: NaiveDate,
}

impl Analytics {
    pub fn new(workouts: Vec<WorkoutRecord>, weight_log: Vec<WeightLogEntry>, today: NaiveDate) -> Self {
        Self { workouts, weight_log, today }
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn streak(&self) -> u32 {
        compute_streak(&workout_dates(&self.workouts), self.today)
    }

    pub fn volumes(&self) -> Vec<VolumeSummary> {
        volume_summaries(&self.workouts)
    }

    /// Lifetime volume across all workouts
    pub fn total_volume(&self) -> f64 {
        self.workouts.iter().map(compute_workout_volume).sum()
    }

    pub fn muscle_distribution(&self, range: TimeRange) -> Vec<MuscleShare> {
        compute_muscle_distribution(&self.workouts, range, self.today)
    }

    pub fn personal_records(&self) -> Vec<PersonalRecord> {
        compute_pr_timeline(&self.workouts)
    }

    pub fn overload(&self) -> Vec<OverloadTrend> {
        classify_overload(&self.workouts)
    }

    pub fn weight_series(&self) -> WeightSeries {
        prepare_weight_series(&self.weight_log)
    }

    pub fn report(&self, range: TimeRange) -> ProgressReport {
        ProgressReport {
            today: self.today,
            streak: self.streak(),
            volumes: self.volumes(),
            muscle_distribution: self.muscle_distribution(range),
            range,
            personal_records: self.personal_records(),
            overload: self.overload(),
            weight_series: self.weight_series(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{exercise, today, workout};
    use super::*;

    fn sample_analytics() -> Analytics {
        let workouts = vec![
            workout(3, 0, vec![exercise("bench_press", "Chest", &[(85.0, 6), (80.0, 8)])]),
            workout(2, 1, vec![exercise("squat", "Quads", &[(100.0, 5)])]),
            workout(1, 7, vec![exercise("bench_press", "Chest", &[(75.0, 8)])]),
        ];
        let weight_log = vec![WeightLogEntry {
            user_id: 1,
            date: today(),
            weight: 81.3,
        }];
        Analytics::new(workouts, weight_log, today())
    }

    #[test]
    fn test_analytics_empty() {
        let analytics = Analytics::new(vec![], vec![], today());
        assert_eq!(analytics.streak(), 0);
        assert_eq!(analytics.total_volume(), 0.0);
        assert!(analytics.volumes().is_empty());
        assert!(analytics.muscle_distribution(TimeRange::All).is_empty());
        assert!(analytics.personal_records().is_empty());
        assert!(analytics.overload().is_empty());
        assert!(analytics.weight_series().points.is_empty());
    }

    #[test]
    fn test_analytics_views() {
        let analytics = sample_analytics();
        assert_eq!(analytics.streak(), 2);
        assert_eq!(analytics.total_volume(), 1150.0 + 500.0 + 600.0);
        assert_eq!(analytics.personal_records().len(), 2);

        let overload = analytics.overload();
        assert_eq!(overload.len(), 1);
        assert_eq!(overload[0].exercise_key, "bench_press");
        assert_eq!(overload[0].status, TrendStatus::Improving);
    }

    #[test]
    fn test_report_idempotent() {
        let analytics = sample_analytics();
        let first = analytics.report(TimeRange::Week);
        let second = analytics.report(TimeRange::Week);
        assert_eq!(first, second);
        assert_eq!(first.range, TimeRange::Week);
        assert_eq!(first.weight_series.points.len(), 1);
    }
}
