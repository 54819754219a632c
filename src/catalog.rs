//! Boundary traits for externally-owned capabilities
//!
//! The core never touches persistence or the exercise catalog directly.
//! These traits describe the read-only lookups the caller provides: exercise
//! search, historical log reads, and optional movement memory. All are
//! async because the real implementations sit on a remote data store.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::session::MovementPattern;
use crate::models::workout::WorkoutLog;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// ---------------------------------------------------------------------------
/// Exercise Identity
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub muscle_group: String,
    pub movement_pattern: MovementPattern,
}

/// ---------------------------------------------------------------------------
/// Exercise Catalog
/// ---------------------------------------------------------------------------

/// Queryable exercise catalog with first-match-wins semantics.
///
/// Callers searching by name should fall back to `find_by_muscle_group`
/// when the name search returns nothing; the planner relies only on
/// `find_by_pattern`.
#[async_trait]
pub trait ExerciseCatalog {
    /// First exercise matching the movement pattern, skipping `excluding`
    /// (the user's aversion list). `None` is a valid answer, not an error.
    async fn find_by_pattern(
        &self,
        pattern: MovementPattern,
        excluding: &[String],
    ) -> Result<Option<Exercise>, CatalogError>;

    /// First exercise whose name contains the substring
    async fn find_by_name(
        &self,
        name_substring: &str,
        excluding: &[String],
    ) -> Result<Option<Exercise>, CatalogError>;

    /// First exercise targeting the muscle group
    async fn find_by_muscle_group(
        &self,
        muscle_group: &str,
        excluding: &[String],
    ) -> Result<Option<Exercise>, CatalogError>;
}

/// ---------------------------------------------------------------------------
/// Workout History
/// ---------------------------------------------------------------------------

/// Read access to the user's completed workout logs, newest first
#[async_trait]
pub trait WorkoutHistory {
    async fn list_workouts(
        &self,
        limit: usize,
        since: Option<NaiveDate>,
    ) -> Result<Vec<WorkoutLog>, CatalogError>;
}

/// ---------------------------------------------------------------------------
/// Movement Memory
/// ---------------------------------------------------------------------------

/// Last known working numbers for an exercise, used only to enrich
/// load-guidance text. Absence degrades gracefully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementMemoryEntry {
    pub weight_kg: f64,
    pub reps: u8,
    /// e.g. "confident", "tentative"
    pub confidence_label: Option<String>,
}

#[async_trait]
pub trait MovementMemory {
    async fn last_known(
        &self,
        exercise_name: &str,
    ) -> Result<Option<MovementMemoryEntry>, CatalogError>;
}
