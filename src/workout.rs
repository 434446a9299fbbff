//! Workout log records - what the store hands to the analytics engine

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::muscles::{normalize_muscle_list, normalize_muscle_name};

/// A saved workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: i64,
    #[serde(alias = "userId")]
    pub user_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "durationMs")]
    pub duration_ms: u64,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutRecord {
    /// Iterate over every set of every exercise
    pub fn sets(&self) -> impl Iterator<Item = &SetEntry> {
        self.exercises.iter().flat_map(|e| e.sets.iter())
    }
}

/// One exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub key: String,
    #[serde(alias = "displayName", alias = "display")]
    pub display_name: String,
    #[serde(default)]
    pub muscles: MuscleTargets,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

impl ExerciseEntry {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            muscles: MuscleTargets::default(),
            sets: Vec::new(),
        }
    }

    pub fn with_muscles(mut self, muscles: MuscleTargets) -> Self {
        self.muscles = muscles;
        self
    }

    pub fn with_set(mut self, set: SetEntry) -> Self {
        self.sets.push(set);
        self
    }

    /// Sets with both weight and reps above zero
    pub fn working_sets(&self) -> impl Iterator<Item = &SetEntry> {
        self.sets.iter().filter(|s| s.is_working_set())
    }
}

/// Muscles an exercise trains, by role.
///
/// Stored snapshots may still carry the older positional form
/// `["Chest", "Triceps", "Shoulders"]`; it is read as primary, secondary,
/// support in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMuscles")]
pub struct MuscleTargets {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub support: Option<String>,
}

impl MuscleTargets {
    pub fn primary(muscle: impl Into<String>) -> Self {
        Self {
            primary: Some(muscle.into()),
            ..Self::default()
        }
    }

    pub fn new(primary: &str, secondary: Option<&str>, support: Option<&str>) -> Self {
        Self {
            primary: Some(primary.to_string()),
            secondary: secondary.map(str::to_string),
            support: support.map(str::to_string),
        }
    }

    /// Build targets from a catalog muscle list, applying synonym mapping
    /// and dropping anything outside the known muscle set
    pub fn from_catalog<S: AsRef<str>>(muscles: &[S]) -> Self {
        Self::from_positions(normalize_muscle_list(muscles))
    }

    fn from_positions(list: Vec<String>) -> Self {
        let mut it = list.into_iter();
        Self {
            primary: it.next(),
            secondary: it.next(),
            support: it.next(),
        }
    }

    /// Primary muscle, case-normalized; `None` for blanks and placeholders
    pub fn attributed_muscle(&self) -> Option<String> {
        self.primary.as_deref().and_then(normalize_muscle_name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMuscles {
    Tagged {
        #[serde(default)]
        primary: Option<String>,
        #[serde(default)]
        secondary: Option<String>,
        #[serde(default)]
        support: Option<String>,
    },
    Positional(Vec<Option<String>>),
    /// `null` or anything unreadable: no muscles
    Unknown(serde::de::IgnoredAny),
}

impl From<RawMuscles> for MuscleTargets {
    fn from(raw: RawMuscles) -> Self {
        match raw {
            RawMuscles::Tagged { primary, secondary, support } => Self { primary, secondary, support },
            RawMuscles::Positional(list) => {
                let mut it = list.into_iter();
                Self {
                    primary: it.next().flatten(),
                    secondary: it.next().flatten(),
                    support: it.next().flatten(),
                }
            }
            RawMuscles::Unknown(_) => Self::default(),
        }
    }
}

/// A single logged set. Blank fields are kept as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_reps")]
    pub reps: Option<u32>,
}

impl SetEntry {
    pub fn new(weight: f64, reps: u32) -> Self {
        Self {
            weight: sanitize_weight(weight),
            reps: Some(reps),
        }
    }

    /// Placeholder set with nothing filled in yet
    pub fn empty() -> Self {
        Self::default()
    }

    /// Weight in kg; missing or out-of-range values count as 0
    pub fn weight_kg(&self) -> f64 {
        self.weight.and_then(sanitize_weight).unwrap_or(0.0)
    }

    pub fn rep_count(&self) -> u32 {
        self.reps.unwrap_or(0)
    }

    /// weight x reps, zero when either is missing
    pub fn volume(&self) -> f64 {
        self.weight_kg() * self.rep_count() as f64
    }

    pub fn is_working_set(&self) -> bool {
        self.weight_kg() > 0.0 && self.rep_count() > 0
    }
}

/// Body weight measurement for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLogEntry {
    #[serde(alias = "userId")]
    pub user_id: i64,
    pub date: NaiveDate,
    pub weight: f64,
}

/// Heaviest weight accepted for a single set (kg)
pub const MAX_SET_WEIGHT_KG: f64 = 1000.0;

/// Numeric field as it shows up in stored snapshots
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawNumber {
    fn weight(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => sanitize_weight(*n),
            RawNumber::Text(s) => parse_weight(s),
            RawNumber::Other(_) => None,
        }
    }

    fn reps(&self) -> Option<u32> {
        match self {
            RawNumber::Number(n) => reps_from_f64(*n),
            RawNumber::Text(s) => parse_reps(s),
            RawNumber::Other(_) => None,
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".").parse::<f64>().ok()
}

fn sanitize_weight(value: f64) -> Option<f64> {
    (value.is_finite() && (0.0..=MAX_SET_WEIGHT_KG).contains(&value)).then_some(value)
}

/// Parse a weight, treating blanks, garbage, negatives and implausible
/// values as absent
pub fn parse_weight(raw: &str) -> Option<f64> {
    parse_number(raw).and_then(sanitize_weight)
}

/// Parse a rep count; fractional input is truncated
pub fn parse_reps(raw: &str) -> Option<u32> {
    parse_number(raw).and_then(reps_from_f64)
}

fn reps_from_f64(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value.trunc() as u32)
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.weight()))
}

fn lenient_reps<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.reps()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_volume() {
        assert_eq!(SetEntry::new(80.0, 10).volume(), 800.0);
        assert_eq!(SetEntry::empty().volume(), 0.0);
        assert!(!SetEntry::new(0.0, 10).is_working_set());
        assert!(!SetEntry::new(80.0, 0).is_working_set());
    }

    #[test]
    fn test_lenient_set_parsing() {
        let sets: Vec<SetEntry> = serde_json::from_str(
            r#"[
                {"weight": "82,5", "reps": "5"},
                {"weight": "", "reps": ""},
                {"weight": null},
                {"weight": -10, "reps": 8},
                {"weight": "heavy", "reps": true},
                {"weight": 60, "reps": 12.0}
            ]"#,
        )
        .unwrap();

        assert_eq!(sets[0], SetEntry { weight: Some(82.5), reps: Some(5) });
        assert_eq!(sets[1], SetEntry::empty());
        assert_eq!(sets[2], SetEntry::empty());
        assert_eq!(sets[3], SetEntry { weight: None, reps: Some(8) });
        assert_eq!(sets[4], SetEntry::empty());
        assert_eq!(sets[5], SetEntry { weight: Some(60.0), reps: Some(12) });
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_weight(" 100 "), Some(100.0));
        assert_eq!(parse_weight("-5"), None);
        assert_eq!(parse_weight("NaN"), None);
        assert_eq!(parse_reps("8"), Some(8));
        assert_eq!(parse_reps(""), None);
    }

    #[test]
    fn test_muscles_positional_form() {
        let entry: ExerciseEntry = serde_json::from_str(
            r#"{"key": "bench_press", "display": "Bench Press",
                "muscles": ["Chest", "Triceps"], "sets": []}"#,
        )
        .unwrap();

        assert_eq!(entry.muscles.primary.as_deref(), Some("Chest"));
        assert_eq!(entry.muscles.secondary.as_deref(), Some("Triceps"));
        assert_eq!(entry.muscles.support, None);
    }

    #[test]
    fn test_muscles_tagged_form() {
        let targets: MuscleTargets =
            serde_json::from_str(r#"{"primary": "back", "support": "Biceps"}"#).unwrap();
        assert_eq!(targets.attributed_muscle().as_deref(), Some("Back"));
        assert_eq!(targets.secondary, None);

        let json = serde_json::to_string(&targets).unwrap();
        assert!(json.contains("\"primary\":\"back\""));
    }

    #[test]
    fn test_muscles_null_or_garbage() {
        let entry: ExerciseEntry = serde_json::from_str(
            r#"{"key": "x", "display": "X", "muscles": null, "sets": []}"#,
        )
        .unwrap();
        assert_eq!(entry.muscles, MuscleTargets::default());
        assert_eq!(entry.muscles.attributed_muscle(), None);

        let entry: ExerciseEntry = serde_json::from_str(
            r#"{"key": "x", "display": "X", "muscles": 42}"#,
        )
        .unwrap();
        assert_eq!(entry.muscles, MuscleTargets::default());
    }

    #[test]
    fn test_huge_weight_stays_finite() {
        let set = SetEntry::new(1e308, 10);
        assert_eq!(set.weight, None);
        assert_eq!(set.volume(), 0.0);

        let forced = SetEntry { weight: Some(f64::MAX), reps: Some(u32::MAX) };
        assert!(forced.volume().is_finite());
        assert!(!forced.is_working_set());

        let heaviest = SetEntry::new(MAX_SET_WEIGHT_KG, u32::MAX);
        assert!(heaviest.volume().is_finite());
        assert_eq!(parse_weight("1e308"), None);
    }

    #[test]
    fn test_muscles_from_catalog() {
        let targets = MuscleTargets::from_catalog(&["Lats", "Biceps", "-"]);
        assert_eq!(targets.primary.as_deref(), Some("Back"));
        assert_eq!(targets.secondary.as_deref(), Some("Biceps"));
        assert_eq!(targets.support, None);
    }

    #[test]
    fn test_workout_camel_case_aliases() {
        let workout: WorkoutRecord = serde_json::from_str(
            r#"{"id": 1, "userId": 7, "date": "2026-03-01", "name": "Push",
                "durationMs": 3600000,
                "exercises": [{"key": "push_up", "displayName": "Push-Up",
                               "sets": [{"weight": "0", "reps": "20"}]}]}"#,
        )
        .unwrap();

        assert_eq!(workout.user_id, 7);
        assert_eq!(workout.duration_ms, 3_600_000);
        assert_eq!(workout.sets().count(), 1);
        assert_eq!(workout.exercises[0].working_sets().count(), 0);
    }
}
