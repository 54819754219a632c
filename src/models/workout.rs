use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Historical Workout Logs (input to pattern detection and inference)
/// ---------------------------------------------------------------------------

/// One completed historical session, as supplied by the history collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
  pub completed_at: NaiveDate,
  /// Free-text focus label as the user entered it, e.g. "Push Day"
  pub focus: String,
  pub sets: Vec<LoggedSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedSet {
  pub exercise_name: String,
  pub reps: u8,
  pub weight_kg: Option<f64>,
  pub warmup: bool,
}

impl WorkoutLog {
  /// Distinct exercise names in this session, working sets only,
  /// in first-seen order
  pub fn exercise_names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for set in self.sets.iter().filter(|s| !s.warmup) {
      if !names.contains(&set.exercise_name.as_str()) {
        names.push(&set.exercise_name);
      }
    }
    names
  }
}
