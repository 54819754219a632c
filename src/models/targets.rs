use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::session::{DayOfWeek, RunType};

/// ---------------------------------------------------------------------------
/// Session Range
/// ---------------------------------------------------------------------------

/// Min/max session count for one trainable category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRange {
  pub min: u8,
  pub max: u8,
}

impl SessionRange {
  pub fn new(min: u8, max: u8) -> Self {
    Self { min, max }
  }

  /// Midpoint rounded up, used to size the lifting rotation.
  /// Widened before summing so extreme ranges cannot overflow.
  pub fn midpoint(&self) -> u8 {
    ((self.min as u16 + self.max as u16).div_ceil(2)) as u8
  }

  /// Midpoint rounded down, used for "up to the midpoint" filler placements
  pub fn midpoint_floor(&self) -> u8 {
    ((self.min as u16 + self.max as u16) / 2) as u8
  }
}

/// ---------------------------------------------------------------------------
/// Weekly Targets
/// ---------------------------------------------------------------------------

/// The user's stated targets for one training week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTargets {
  pub hypertrophy: SessionRange,
  pub zone2: SessionRange,
  /// Duration target for each steady-state cardio session
  pub zone2_duration_min: u32,
  pub tempo_runs: u8,
  pub interval_runs: u8,
  pub rest_days: u8,
  pub available_days: Vec<DayOfWeek>,
}

impl Default for WeeklyTargets {
  fn default() -> Self {
    Self {
      hypertrophy: SessionRange::new(3, 4),
      zone2: SessionRange::new(1, 2),
      zone2_duration_min: 30,
      tempo_runs: 0,
      interval_runs: 0,
      rest_days: 1,
      available_days: DayOfWeek::ALL.to_vec(),
    }
  }
}

impl WeeklyTargets {
  pub fn is_available(&self, day: DayOfWeek) -> bool {
    self.available_days.contains(&day)
  }

  /// Minimum number of sessions the targets require
  pub fn minimum_sessions(&self) -> u8 {
    self.hypertrophy.min + self.zone2.min + self.tempo_runs + self.interval_runs
  }

  /// Check feasibility. Over-constrained targets produce warnings, never errors;
  /// the allocator still returns a best-effort plan.
  pub fn validate(&self) -> Vec<String> {
    let mut warnings = Vec::new();

    let required = self.minimum_sessions() as usize + self.rest_days as usize;
    if required > self.available_days.len() {
      warnings.push(format!(
        "Targets need {} days ({} sessions + {} rest) but only {} are available",
        required,
        self.minimum_sessions(),
        self.rest_days,
        self.available_days.len()
      ));
    }

    if self.hypertrophy.min > self.hypertrophy.max {
      warnings.push(format!(
        "Hypertrophy range is inverted ({}-{})",
        self.hypertrophy.min, self.hypertrophy.max
      ));
    }
    if self.zone2.min > self.zone2.max {
      warnings.push(format!(
        "Zone-2 range is inverted ({}-{})",
        self.zone2.min, self.zone2.max
      ));
    }

    warnings
  }
}

/// ---------------------------------------------------------------------------
/// Running Schedule
/// ---------------------------------------------------------------------------

/// Externally supplied day-to-run mapping. Fixed for the week: the allocator
/// routes around it and never overwrites an entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunningSchedule(BTreeMap<DayOfWeek, RunType>);

impl RunningSchedule {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_run(mut self, day: DayOfWeek, run: RunType) -> Self {
    self.0.insert(day, run);
    self
  }

  pub fn get(&self, day: DayOfWeek) -> Option<RunType> {
    self.0.get(&day).copied()
  }

  /// Iterate in day order (BTreeMap keeps this deterministic)
  pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, RunType)> + '_ {
    self.0.iter().map(|(d, r)| (*d, *r))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
