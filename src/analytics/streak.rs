//! Consecutive-day training streak

use chrono::{Duration, NaiveDate};

use crate::workout::WorkoutRecord;

/// Count consecutive training days ending today.
///
/// A day without a workout today yields 0, even if yesterday and the days
/// before form an unbroken run.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut days = dates.to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut streak = 0;
    let mut expected = today;
    for day in days {
        if day != expected {
            break;
        }
        streak += 1;
        expected -= Duration::days(1);
    }
    streak
}

/// Training days of a workout log
pub fn workout_dates(workouts: &[WorkoutRecord]) -> Vec<NaiveDate> {
    workouts.iter().map(|w| w.date).collect()
}
