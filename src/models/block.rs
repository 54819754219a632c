use serde::{Deserialize, Serialize};

use super::session::{ExperienceLevel, Goal};

/// ---------------------------------------------------------------------------
/// Phase Configuration
/// ---------------------------------------------------------------------------

/// One multi-week phase of a training block. Immutable per block; selected
/// once and referenced by week-in-phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
  pub name: String,
  pub duration_weeks: u8,
  pub volume_multiplier: f64,
  pub intensity_multiplier: f64,
  pub rep_min: u8,
  pub rep_max: u8,
  pub rpe_min: f64,
  pub rpe_max: f64,
}

impl PhaseConfig {
  /// Rep range as display text, e.g. "8-12"
  pub fn rep_range_text(&self) -> String {
    format!("{}-{}", self.rep_min, self.rep_max)
  }
}

/// ---------------------------------------------------------------------------
/// Block Configuration
/// ---------------------------------------------------------------------------

/// Drives split and periodization selection for one training block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockConfig {
  pub goal: Goal,
  pub duration_weeks: u8,
  pub days_per_week: u8,
  pub experience: ExperienceLevel,
  /// When set, overrides the goal-derived phase sequence with a single phase
  /// selected by name from the goal's template
  pub phase_override: Option<String>,
}

impl Default for BlockConfig {
  fn default() -> Self {
    Self {
      goal: Goal::default(),
      duration_weeks: 8,
      days_per_week: 4,
      experience: ExperienceLevel::default(),
      phase_override: None,
    }
  }
}
