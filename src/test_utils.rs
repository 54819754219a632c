//! Test utilities and helpers
//!
//! Mock data factories for historical logs plus stub implementations of the
//! boundary traits, so planner and inference tests run without any real
//! catalog or data store behind them.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::catalog::{
    CatalogError, Exercise, ExerciseCatalog, MovementMemory, MovementMemoryEntry, WorkoutHistory,
};
use crate::models::session::MovementPattern;
use crate::models::workout::{LoggedSet, WorkoutLog};

/// ---------------------------------------------------------------------------
/// Date Anchor
/// ---------------------------------------------------------------------------

/// Fixed "today" so history fixtures are stable regardless of wall clock
pub fn anchor_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date")
}

/// ---------------------------------------------------------------------------
/// History Factories
/// ---------------------------------------------------------------------------

/// One completed workout `days_ago` before the anchor date. Each exercise
/// tuple is (name, reps, weight) and expands to three working sets.
pub fn workout(days_ago: i64, focus: &str, exercises: &[(&str, u8, Option<f64>)]) -> WorkoutLog {
    let mut sets = Vec::new();
    for (name, reps, weight) in exercises {
        for _ in 0..3 {
            sets.push(LoggedSet {
                exercise_name: name.to_string(),
                reps: *reps,
                weight_kg: *weight,
                warmup: false,
            });
        }
    }
    WorkoutLog {
        completed_at: anchor_today() - chrono::Duration::days(days_ago),
        focus: focus.to_string(),
        sets,
    }
}

/// `count` workouts cycling Push/Pull/Legs evenly across `span_days`,
/// each with that focus's habitual exercises
pub fn ppl_history(count: usize, span_days: i64) -> Vec<WorkoutLog> {
    let mut history = Vec::new();
    for i in 0..count {
        let days_ago = if count > 1 {
            span_days * i as i64 / (count as i64 - 1)
        } else {
            0
        };
        let (focus, exercises): (&str, &[(&str, u8, Option<f64>)]) = match i % 3 {
            0 => (
                "Push Day",
                &[
                    ("Bench Press", 8, Some(80.0)),
                    ("Overhead Press", 10, Some(40.0)),
                ],
            ),
            1 => (
                "Pull Day",
                &[
                    ("Barbell Row", 8, Some(70.0)),
                    ("Lat Pulldown", 10, Some(55.0)),
                ],
            ),
            _ => (
                "Leg Day",
                &[("Back Squat", 6, Some(100.0)), ("Leg Press", 10, Some(140.0))],
            ),
        };
        history.push(workout(days_ago, focus, exercises));
    }
    history
}

/// ---------------------------------------------------------------------------
/// Stub Boundary Implementations
/// ---------------------------------------------------------------------------

/// In-memory exercise catalog with first-match-wins lookups
pub struct StubCatalog {
    pub exercises: Vec<Exercise>,
}

impl StubCatalog {
    /// A small catalog covering every movement pattern the splits use
    pub fn full() -> Self {
        let entries = [
            ("Back Squat", "quads", MovementPattern::Squat),
            ("Romanian Deadlift", "hamstrings", MovementPattern::Hinge),
            ("Walking Lunge", "quads", MovementPattern::Lunge),
            ("Bench Press", "chest", MovementPattern::HorizontalPush),
            ("Overhead Press", "shoulders", MovementPattern::VerticalPush),
            ("Barbell Row", "back", MovementPattern::HorizontalPull),
            ("Lat Pulldown", "back", MovementPattern::VerticalPull),
            ("Plank", "core", MovementPattern::CoreBrace),
            ("Cable Curl", "biceps", MovementPattern::Isolation),
        ];
        Self {
            exercises: entries
                .iter()
                .map(|(name, group, pattern)| Exercise {
                    name: name.to_string(),
                    muscle_group: group.to_string(),
                    movement_pattern: *pattern,
                })
                .collect(),
        }
    }

    /// A catalog missing the given movement pattern entirely
    pub fn without(pattern: MovementPattern) -> Self {
        let mut catalog = Self::full();
        catalog.exercises.retain(|e| e.movement_pattern != pattern);
        catalog
    }
}

#[async_trait]
impl ExerciseCatalog for StubCatalog {
    async fn find_by_pattern(
        &self,
        pattern: MovementPattern,
        excluding: &[String],
    ) -> Result<Option<Exercise>, CatalogError> {
        Ok(self
            .exercises
            .iter()
            .find(|e| e.movement_pattern == pattern && !excluding.contains(&e.name))
            .cloned())
    }

    async fn find_by_name(
        &self,
        name_substring: &str,
        excluding: &[String],
    ) -> Result<Option<Exercise>, CatalogError> {
        Ok(self
            .exercises
            .iter()
            .find(|e| e.name.contains(name_substring) && !excluding.contains(&e.name))
            .cloned())
    }

    async fn find_by_muscle_group(
        &self,
        muscle_group: &str,
        excluding: &[String],
    ) -> Result<Option<Exercise>, CatalogError> {
        Ok(self
            .exercises
            .iter()
            .find(|e| e.muscle_group == muscle_group && !excluding.contains(&e.name))
            .cloned())
    }
}

/// History stub backed by a fixed workout list
pub struct StubHistory {
    pub workouts: Vec<WorkoutLog>,
}

#[async_trait]
impl WorkoutHistory for StubHistory {
    async fn list_workouts(
        &self,
        limit: usize,
        since: Option<NaiveDate>,
    ) -> Result<Vec<WorkoutLog>, CatalogError> {
        let mut result: Vec<WorkoutLog> = self
            .workouts
            .iter()
            .filter(|w| since.is_none_or(|s| w.completed_at >= s))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        result.truncate(limit);
        Ok(result)
    }
}

/// Movement memory remembering a single exercise
pub struct StubMemory {
    pub exercise_name: String,
    pub entry: MovementMemoryEntry,
}

#[async_trait]
impl MovementMemory for StubMemory {
    async fn last_known(
        &self,
        exercise_name: &str,
    ) -> Result<Option<MovementMemoryEntry>, CatalogError> {
        if exercise_name == self.exercise_name {
            Ok(Some(self.entry.clone()))
        } else {
            Ok(None)
        }
    }
}
