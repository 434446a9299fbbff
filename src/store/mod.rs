//! Workout store - supplies workout and body weight snapshots
//!
//! The analytics engine never fetches anything itself; callers load a
//! snapshot through a `WorkoutStore` and hand the records over.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::workout::{WeightLogEntry, WorkoutRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Malformed snapshot {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Read access to one user's logs
pub trait WorkoutStore {
    /// Workouts, newest first
    fn fetch_workouts(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, StoreError>;

    /// Body weight log, oldest first, one entry per day
    fn fetch_weight_log(&self, user_id: i64) -> Result<Vec<WeightLogEntry>, StoreError>;
}

/// Serialized form of a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
    #[serde(default, alias = "weightLog")]
    pub weight_log: Vec<WeightLogEntry>,
}

impl Snapshot {
    fn workouts_for(&self, user_id: i64) -> Vec<WorkoutRecord> {
        let mut workouts: Vec<WorkoutRecord> = self
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        workouts
    }

    /// Weight log for a user; a repeated day keeps its last entry
    fn weight_log_for(&self, user_id: i64) -> Vec<WeightLogEntry> {
        let mut by_day = BTreeMap::new();
        for entry in self.weight_log.iter().filter(|e| e.user_id == user_id) {
            if let Some(previous) = by_day.insert(entry.date, entry.clone()) {
                warn!(
                    user_id,
                    date = %previous.date,
                    "duplicate weight entry, keeping the later one"
                );
            }
        }
        by_day.into_values().collect()
    }
}

/// Store backed by a snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl WorkoutStore for MemoryStore {
    fn fetch_workouts(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, StoreError> {
        Ok(self.snapshot.workouts_for(user_id))
    }

    fn fetch_weight_log(&self, user_id: i64) -> Result<Vec<WeightLogEntry>, StoreError> {
        Ok(self.snapshot.weight_log_for(user_id))
    }
}

/// Store reading a JSON snapshot file
pub struct JsonSnapshotStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonSnapshotStore {
    /// Open and parse a snapshot file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|e| {
            StoreError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        info!(
            path = %path.display(),
            workouts = snapshot.workouts.len(),
            weight_entries = snapshot.weight_log.len(),
            "snapshot loaded"
        );
        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkoutStore for JsonSnapshotStore {
    fn fetch_workouts(&self, user_id: i64) -> Result<Vec<WorkoutRecord>, StoreError> {
        let workouts = self.snapshot.workouts_for(user_id);
        debug!(user_id, count = workouts.len(), "workouts fetched");
        Ok(workouts)
    }

    fn fetch_weight_log(&self, user_id: i64) -> Result<Vec<WeightLogEntry>, StoreError> {
        let log = self.snapshot.weight_log_for(user_id);
        debug!(user_id, count = log.len(), "weight log fetched");
        Ok(log)
    }
}

/// Write a snapshot as pretty JSON
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}
