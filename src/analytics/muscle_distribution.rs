//! Muscle group focus over a time window

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::workout::WorkoutRecord;

/// Window of history to aggregate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl TimeRange {
    /// Window length in days, `None` for all history
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::Year => Some(365),
            TimeRange::All => None,
        }
    }

    /// Whether a workout on `date` falls inside the window ending `today`
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.days() {
            Some(days) => date >= today - Duration::days(days),
            None => true,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::Week => write!(f, "week"),
            TimeRange::Month => write!(f, "month"),
            TimeRange::Year => write!(f, "year"),
            TimeRange::All => write!(f, "all"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            "all" => Ok(TimeRange::All),
            other => Err(format!("Unknown time range: {}", other)),
        }
    }
}

/// Share of training emphasis for one muscle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleShare {
    pub muscle: String,
    pub percent: f64,
}

impl MuscleShare {
    /// Percent rounded to a whole number for display
    pub fn rounded_percent(&self) -> u32 {
        self.percent.round() as u32
    }
}

/// Percentage breakdown of training per primary muscle.
///
/// Each exercise entry counts once per logged set (at least once) towards
/// its primary muscle. Sorted by percent, highest first.
pub fn compute_muscle_distribution(
    workouts: &[WorkoutRecord],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<MuscleShare> {
    let mut totals: HashMap<String, usize> = HashMap::new();

    for workout in workouts.iter().filter(|w| range.contains(w.date, today)) {
        for entry in &workout.exercises {
            let Some(muscle) = entry.muscles.attributed_muscle() else {
                trace!(exercise = %entry.key, "no primary muscle, skipped");
                continue;
            };
            *totals.entry(muscle).or_insert(0) += entry.sets.len().max(1);
        }
    }

    let grand_total: usize = totals.values().sum();
    if grand_total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<MuscleShare> = totals
        .into_iter()
        .map(|(muscle, count)| MuscleShare {
            muscle,
            percent: count as f64 / grand_total as f64 * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.percent
            .total_cmp(&a.percent)
            .then_with(|| a.muscle.cmp(&b.muscle))
    });
    shares
}
