use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Day of Week
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

impl DayOfWeek {
  /// All days in display order (Monday-start week)
  pub const ALL: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
  ];

  /// Zero-based index within the week (Monday = 0)
  pub fn index(&self) -> usize {
    match self {
      DayOfWeek::Monday => 0,
      DayOfWeek::Tuesday => 1,
      DayOfWeek::Wednesday => 2,
      DayOfWeek::Thursday => 3,
      DayOfWeek::Friday => 4,
      DayOfWeek::Saturday => 5,
      DayOfWeek::Sunday => 6,
    }
  }

  pub fn from_index(idx: usize) -> Option<DayOfWeek> {
    Self::ALL.get(idx).copied()
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      DayOfWeek::Monday => "Monday",
      DayOfWeek::Tuesday => "Tuesday",
      DayOfWeek::Wednesday => "Wednesday",
      DayOfWeek::Thursday => "Thursday",
      DayOfWeek::Friday => "Friday",
      DayOfWeek::Saturday => "Saturday",
      DayOfWeek::Sunday => "Sunday",
    }
  }
}

impl std::fmt::Display for DayOfWeek {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// ---------------------------------------------------------------------------
/// Session Types
/// ---------------------------------------------------------------------------

/// The vocabulary of trainable session kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
  Rest,
  HypertrophyLift,
  StrengthLift,
  Zone2Cardio,
  TempoRun,
  Intervals,
  LongRun,
  EasyRun,
}

impl SessionType {
  /// Hard-effort cardio needs a recovery buffer on adjacent days
  pub fn is_hard_cardio(&self) -> bool {
    matches!(
      self,
      SessionType::TempoRun | SessionType::Intervals | SessionType::LongRun
    )
  }

  pub fn is_lift(&self) -> bool {
    matches!(self, SessionType::HypertrophyLift | SessionType::StrengthLift)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      SessionType::Rest => "rest",
      SessionType::HypertrophyLift => "hypertrophy_lift",
      SessionType::StrengthLift => "strength_lift",
      SessionType::Zone2Cardio => "zone2_cardio",
      SessionType::TempoRun => "tempo_run",
      SessionType::Intervals => "intervals",
      SessionType::LongRun => "long_run",
      SessionType::EasyRun => "easy_run",
    }
  }
}

impl std::fmt::Display for SessionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for SessionType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "rest" => Ok(SessionType::Rest),
      "hypertrophy_lift" => Ok(SessionType::HypertrophyLift),
      "strength_lift" => Ok(SessionType::StrengthLift),
      "zone2_cardio" => Ok(SessionType::Zone2Cardio),
      "tempo_run" => Ok(SessionType::TempoRun),
      "intervals" => Ok(SessionType::Intervals),
      "long_run" => Ok(SessionType::LongRun),
      "easy_run" => Ok(SessionType::EasyRun),
      _ => Err(format!("Unknown session type: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Run Types (external running schedule)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
  Easy,
  Tempo,
  Intervals,
  Long,
  Recovery,
}

impl RunType {
  /// Tempo, intervals, and long runs require adjacent-day recovery
  pub fn is_hard(&self) -> bool {
    matches!(self, RunType::Tempo | RunType::Intervals | RunType::Long)
  }

  pub fn session_type(&self) -> SessionType {
    match self {
      RunType::Easy | RunType::Recovery => SessionType::EasyRun,
      RunType::Tempo => SessionType::TempoRun,
      RunType::Intervals => SessionType::Intervals,
      RunType::Long => SessionType::LongRun,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      RunType::Easy => "easy",
      RunType::Tempo => "tempo",
      RunType::Intervals => "intervals",
      RunType::Long => "long",
      RunType::Recovery => "recovery",
    }
  }
}

impl std::fmt::Display for RunType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// ---------------------------------------------------------------------------
/// Focus Categories (closed vocabulary for lift focuses)
/// ---------------------------------------------------------------------------

/// Canonical labels that free-text workout focuses normalize into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusCategory {
  Push,
  Pull,
  Legs,
  Upper,
  Lower,
  FullBody,
  Arms,
  Shoulders,
  Core,
  Conditioning,
}

impl FocusCategory {
  /// Leg-dominant focuses must not sit next to a hard run
  pub fn is_leg_dominant(&self) -> bool {
    matches!(self, FocusCategory::Legs | FocusCategory::Lower)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      FocusCategory::Push => "push",
      FocusCategory::Pull => "pull",
      FocusCategory::Legs => "legs",
      FocusCategory::Upper => "upper",
      FocusCategory::Lower => "lower",
      FocusCategory::FullBody => "full_body",
      FocusCategory::Arms => "arms",
      FocusCategory::Shoulders => "shoulders",
      FocusCategory::Core => "core",
      FocusCategory::Conditioning => "conditioning",
    }
  }

  /// Human-readable label ("Push", "Full Body")
  pub fn label(&self) -> &'static str {
    match self {
      FocusCategory::Push => "Push",
      FocusCategory::Pull => "Pull",
      FocusCategory::Legs => "Legs",
      FocusCategory::Upper => "Upper",
      FocusCategory::Lower => "Lower",
      FocusCategory::FullBody => "Full Body",
      FocusCategory::Arms => "Arms",
      FocusCategory::Shoulders => "Shoulders",
      FocusCategory::Core => "Core",
      FocusCategory::Conditioning => "Conditioning",
    }
  }
}

impl std::fmt::Display for FocusCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for FocusCategory {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "push" => Ok(FocusCategory::Push),
      "pull" => Ok(FocusCategory::Pull),
      "legs" => Ok(FocusCategory::Legs),
      "upper" => Ok(FocusCategory::Upper),
      "lower" => Ok(FocusCategory::Lower),
      "full_body" => Ok(FocusCategory::FullBody),
      "arms" => Ok(FocusCategory::Arms),
      "shoulders" => Ok(FocusCategory::Shoulders),
      "core" => Ok(FocusCategory::Core),
      "conditioning" => Ok(FocusCategory::Conditioning),
      _ => Err(format!("Unknown focus category: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Movement Patterns
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
  Squat,
  Hinge,
  Lunge,
  HorizontalPush,
  VerticalPush,
  HorizontalPull,
  VerticalPull,
  CoreBrace,
  Isolation,
}

impl MovementPattern {
  /// Compounds get extra warm-up sets in prescriptions
  pub fn is_compound(&self) -> bool {
    !matches!(self, MovementPattern::CoreBrace | MovementPattern::Isolation)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      MovementPattern::Squat => "squat",
      MovementPattern::Hinge => "hinge",
      MovementPattern::Lunge => "lunge",
      MovementPattern::HorizontalPush => "horizontal_push",
      MovementPattern::VerticalPush => "vertical_push",
      MovementPattern::HorizontalPull => "horizontal_pull",
      MovementPattern::VerticalPull => "vertical_pull",
      MovementPattern::CoreBrace => "core_brace",
      MovementPattern::Isolation => "isolation",
    }
  }
}

impl std::fmt::Display for MovementPattern {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// ---------------------------------------------------------------------------
/// Experience & Goal
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ExperienceLevel {
  Beginner,
  #[default]
  Intermediate,
  Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Goal {
  Hypertrophy,
  Strength,
  Endurance,
  #[default]
  GeneralFitness,
}

impl Goal {
  pub fn as_str(&self) -> &'static str {
    match self {
      Goal::Hypertrophy => "hypertrophy",
      Goal::Strength => "strength",
      Goal::Endurance => "endurance",
      Goal::GeneralFitness => "general_fitness",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_day_index_roundtrip() {
    for day in DayOfWeek::ALL {
      assert_eq!(DayOfWeek::from_index(day.index()), Some(day));
    }
    assert_eq!(DayOfWeek::from_index(7), None);
  }

  #[test]
  fn test_hard_cardio_classification() {
    assert!(SessionType::TempoRun.is_hard_cardio());
    assert!(SessionType::Intervals.is_hard_cardio());
    assert!(SessionType::LongRun.is_hard_cardio());
    assert!(!SessionType::EasyRun.is_hard_cardio());
    assert!(!SessionType::Zone2Cardio.is_hard_cardio());
  }

  #[test]
  fn test_run_type_maps_to_session() {
    assert_eq!(RunType::Tempo.session_type(), SessionType::TempoRun);
    assert_eq!(RunType::Recovery.session_type(), SessionType::EasyRun);
    assert!(RunType::Long.is_hard());
    assert!(!RunType::Recovery.is_hard());
  }

  #[test]
  fn test_session_type_string_roundtrip() {
    for st in [
      SessionType::Rest,
      SessionType::HypertrophyLift,
      SessionType::StrengthLift,
      SessionType::Zone2Cardio,
      SessionType::TempoRun,
      SessionType::Intervals,
      SessionType::LongRun,
      SessionType::EasyRun,
    ] {
      assert_eq!(st.as_str().parse::<SessionType>(), Ok(st));
    }
  }

  #[test]
  fn test_leg_dominant_focuses() {
    assert!(FocusCategory::Legs.is_leg_dominant());
    assert!(FocusCategory::Lower.is_leg_dominant());
    assert!(!FocusCategory::Push.is_leg_dominant());
    assert!(!FocusCategory::FullBody.is_leg_dominant());
  }
}
