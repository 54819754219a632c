use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::session::{DayOfWeek, SessionType};
use crate::catalog::Exercise;
use crate::splits::SplitDay;

/// ---------------------------------------------------------------------------
/// Prescribed Set
/// ---------------------------------------------------------------------------

/// One prescribed set within a lifting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedSet {
  pub set_number: u8,
  pub target_reps: u8,
  pub target_rpe: f64,
  pub is_warmup: bool,
  /// Tempo cue like "3-1-1" (eccentric-pause-concentric), when prescribed
  pub tempo: Option<String>,
}

/// ---------------------------------------------------------------------------
/// Planned Exercise
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedExercise {
  pub exercise: Exercise,
  pub sets: Vec<PrescribedSet>,
  /// Rep range as display text, e.g. "8-12"
  pub rep_range: String,
  /// Human-readable load guidance, e.g. "Last time: 80kg x 8"
  pub load_guidance: String,
  pub progression_note: Option<String>,
  /// Set when the user manually swaps two days; locked entries are not
  /// regenerated on the next allocation
  pub locked: bool,
}

/// ---------------------------------------------------------------------------
/// Planned Day
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedDay {
  pub day: DayOfWeek,
  pub is_rest: bool,
  pub session: SessionType,
  /// Resolved focus label for lifting days, e.g. "Push"
  pub focus: Option<String>,
  /// The split day actually placed on this slot; the planner resolves
  /// exercises from its movement patterns
  pub split_day: Option<SplitDay>,
  pub notes: Option<String>,
  pub estimated_duration_min: Option<u32>,
  pub exercises: Vec<PlannedExercise>,
}

impl PlannedDay {
  pub fn rest(day: DayOfWeek) -> Self {
    Self {
      day,
      is_rest: true,
      session: SessionType::Rest,
      focus: None,
      split_day: None,
      notes: None,
      estimated_duration_min: None,
      exercises: Vec::new(),
    }
  }

  pub fn session(day: DayOfWeek, session: SessionType) -> Self {
    Self {
      day,
      is_rest: false,
      session,
      focus: None,
      split_day: None,
      notes: None,
      estimated_duration_min: None,
      exercises: Vec::new(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Weekly Plan
/// ---------------------------------------------------------------------------

/// The artifact handed back to the caller. Persistence is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
  pub week_start: NaiveDate,
  /// Current periodization phase label
  pub phase: String,
  /// Exactly seven entries, Monday first
  pub days: Vec<PlannedDay>,
  /// Log of allocation decisions, for display and debugging
  pub rationale: String,
  /// Adjustments applied after allocation (manual swaps etc.)
  pub adjustments: Vec<String>,
}

impl WeeklyPlan {
  pub fn day(&self, day: DayOfWeek) -> Option<&PlannedDay> {
    self.days.iter().find(|d| d.day == day)
  }

  pub fn rest_day_count(&self) -> usize {
    self.days.iter().filter(|d| d.is_rest).count()
  }

  /// Swap the sessions of two days, keeping each entry's day identity.
  /// Swapped exercises are locked so a re-allocation leaves them alone.
  pub fn swap_days(&mut self, a: DayOfWeek, b: DayOfWeek) {
    let (Some(ia), Some(ib)) = (
      self.days.iter().position(|d| d.day == a),
      self.days.iter().position(|d| d.day == b),
    ) else {
      return;
    };
    if ia == ib {
      return;
    }

    self.days.swap(ia, ib);
    self.days[ia].day = a;
    self.days[ib].day = b;

    for idx in [ia, ib] {
      for ex in &mut self.days[idx].exercises {
        ex.locked = true;
      }
    }

    self.adjustments.push(format!("Swapped {} and {}", a, b));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plan_with(days: Vec<PlannedDay>) -> WeeklyPlan {
    WeeklyPlan {
      week_start: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
      phase: "accumulation".to_string(),
      days,
      rationale: String::new(),
      adjustments: Vec::new(),
    }
  }

  #[test]
  fn test_swap_days_exchanges_sessions() {
    let mut plan = plan_with(
      DayOfWeek::ALL
        .iter()
        .map(|d| {
          if *d == DayOfWeek::Monday {
            PlannedDay::session(*d, SessionType::HypertrophyLift)
          } else {
            PlannedDay::rest(*d)
          }
        })
        .collect(),
    );

    plan.swap_days(DayOfWeek::Monday, DayOfWeek::Wednesday);

    assert_eq!(
      plan.day(DayOfWeek::Wednesday).unwrap().session,
      SessionType::HypertrophyLift
    );
    assert!(plan.day(DayOfWeek::Monday).unwrap().is_rest);
    // Day identity stays with the slot
    assert_eq!(plan.days[0].day, DayOfWeek::Monday);
    assert_eq!(plan.adjustments.len(), 1);
  }

  #[test]
  fn test_swap_same_day_is_noop() {
    let mut plan = plan_with(DayOfWeek::ALL.iter().map(|d| PlannedDay::rest(*d)).collect());
    plan.swap_days(DayOfWeek::Friday, DayOfWeek::Friday);
    assert!(plan.adjustments.is_empty());
  }
}
