//! Workout being logged or edited
//!
//! A `WorkoutSession` is a plain value: every edit returns a new session and
//! leaves the original untouched, so callers can hold several at once.

use chrono::NaiveDate;
use thiserror::Error;

use crate::workout::{ExerciseEntry, SetEntry, WorkoutRecord};

/// Placeholder sets a freshly added exercise starts with
pub const DEFAULT_EMPTY_SETS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No exercise at position {0}")]
    NoSuchExercise(usize),

    #[error("Exercise {exercise} has no set at position {set}")]
    NoSuchSet { exercise: usize, set: usize },
}

/// Where a session came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// New workout, id assigned by the store on save
    New,
    /// Editing a saved workout
    Editing { workout_id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub origin: SessionOrigin,
    pub user_id: i64,
    pub date: NaiveDate,
    pub name: String,
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutSession {
    /// Start logging a new workout
    pub fn start(user_id: i64, date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            origin: SessionOrigin::New,
            user_id,
            date,
            name: name.into(),
            exercises: Vec::new(),
        }
    }

    /// Open a saved workout for editing
    pub fn edit(record: &WorkoutRecord) -> Self {
        Self {
            origin: SessionOrigin::Editing { workout_id: record.id },
            user_id: record.user_id,
            date: record.date,
            name: record.name.clone(),
            exercises: record.exercises.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.origin, SessionOrigin::Editing { .. })
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Append an exercise; one without sets gets the default blank sets
    pub fn add_exercise(&self, mut entry: ExerciseEntry) -> Self {
        if entry.sets.is_empty() {
            entry.sets = vec![SetEntry::empty(); DEFAULT_EMPTY_SETS];
        }
        let mut next = self.clone();
        next.exercises.push(entry);
        next
    }

    pub fn remove_exercise(&self, index: usize) -> Result<Self, SessionError> {
        self.check_exercise(index)?;
        let mut next = self.clone();
        next.exercises.remove(index);
        Ok(next)
    }

    pub fn add_set(&self, exercise: usize, set: SetEntry) -> Result<Self, SessionError> {
        self.check_exercise(exercise)?;
        let mut next = self.clone();
        next.exercises[exercise].sets.push(set);
        Ok(next)
    }

    pub fn update_set(&self, exercise: usize, set: usize, value: SetEntry) -> Result<Self, SessionError> {
        self.check_set(exercise, set)?;
        let mut next = self.clone();
        next.exercises[exercise].sets[set] = value;
        Ok(next)
    }

    pub fn remove_set(&self, exercise: usize, set: usize) -> Result<Self, SessionError> {
        self.check_set(exercise, set)?;
        let mut next = self.clone();
        next.exercises[exercise].sets.remove(set);
        Ok(next)
    }

    /// Turn the session into a record ready for the store.
    ///
    /// New workouts get id 0; the store assigns the real one.
    pub fn finish(&self, duration_ms: u64) -> WorkoutRecord {
        let id = match self.origin {
            SessionOrigin::New => 0,
            SessionOrigin::Editing { workout_id } => workout_id,
        };
        WorkoutRecord {
            id,
            user_id: self.user_id,
            date: self.date,
            name: self.name.clone(),
            duration_ms,
            exercises: self.exercises.clone(),
        }
    }

    fn check_exercise(&self, index: usize) -> Result<(), SessionError> {
        if index < self.exercises.len() {
            Ok(())
        } else {
            Err(SessionError::NoSuchExercise(index))
        }
    }

    fn check_set(&self, exercise: usize, set: usize) -> Result<(), SessionError> {
        self.check_exercise(exercise)?;
        if set < self.exercises[exercise].sets.len() {
            Ok(())
        } else {
            Err(SessionError::NoSuchSet { exercise, set })
        }
    }
}
