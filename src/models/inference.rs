use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::session::FocusCategory;

/// ---------------------------------------------------------------------------
/// Detected Pattern
/// ---------------------------------------------------------------------------

/// A recurring pattern classified from historical logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPattern {
  /// e.g. "training_split"
  pub pattern_type: String,
  /// Human name, e.g. "Push/Pull/Legs"
  pub name: String,
  /// Bounded heuristic score in [0,1] - not a p-value
  pub confidence: f64,
  /// Pattern-specific payload (split-day labels, inferred days/week)
  pub data: serde_json::Value,
}

/// ---------------------------------------------------------------------------
/// Inferred Program
/// ---------------------------------------------------------------------------

/// One habitual exercise reconstructed from history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredExercise {
  pub exercise_name: String,
  /// Share of matching historical sessions containing this exercise, in [0,1]
  pub frequency: f64,
  /// Mean working-set count, rounded
  pub typical_sets: u8,
  /// Observed min-max reps as display text, e.g. "6-10"
  pub typical_rep_range: String,
  /// Mean of observed non-null loads
  pub typical_load_kg: Option<f64>,
  pub last_performed: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredWorkoutDay {
  pub focus: FocusCategory,
  pub label: String,
  pub muscle_groups: Vec<String>,
  pub exercises: Vec<InferredExercise>,
}

/// A structured program mirroring what the user has actually been doing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredProgram {
  pub split_name: String,
  pub split_type: String,
  pub days_per_week: u8,
  pub rotation_length: u8,
  pub days: Vec<InferredWorkoutDay>,
  pub confidence: f64,
  pub workouts_analyzed: u32,
  pub weeks_of_data: u32,
  pub summary: String,
  pub highlights: Vec<String>,
}

/// ---------------------------------------------------------------------------
/// Readiness Result
/// ---------------------------------------------------------------------------

/// Result of attempting program inference. Below the readiness gate this is
/// a structured "not ready" with the exact shortfall, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternToProgramResult {
  pub ready: bool,
  pub reason: String,
  /// Additional completed workouts needed before inference is attempted
  pub workouts_needed: u32,
  /// Additional calendar days of tracking needed
  pub days_needed: u32,
  pub program: Option<InferredProgram>,
}

impl PatternToProgramResult {
  pub fn not_ready(reason: String, workouts_needed: u32, days_needed: u32) -> Self {
    Self {
      ready: false,
      reason,
      workouts_needed,
      days_needed,
      program: None,
    }
  }

  pub fn ready(program: InferredProgram) -> Self {
    Self {
      ready: true,
      reason: "Enough history to infer a program".to_string(),
      workouts_needed: 0,
      days_needed: 0,
      program: Some(program),
    }
  }
}
