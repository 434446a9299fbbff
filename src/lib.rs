//! liftlog - Strength training log with progress analytics
//!
//! Workouts, sets and body weight go in; streaks, volume, muscle focus,
//! personal records, overload trends and chartable weight series come out.

pub mod analytics;
pub mod muscles;
pub mod session;
pub mod store;
pub mod workout;

pub use analytics::Analytics;
pub use session::WorkoutSession;
pub use store::{JsonSnapshotStore, MemoryStore, StoreError, WorkoutStore};
