//! Split and periodization template selection
//!
//! Deterministic rule tables: days/week picks the lifting split, goal picks
//! the phase sequence. No learning, no randomness - the same block config
//! always selects the same template.

use serde::{Deserialize, Serialize};

use crate::models::block::{BlockConfig, PhaseConfig};
use crate::models::session::{FocusCategory, Goal, MovementPattern};

/// ---------------------------------------------------------------------------
/// Training Split
/// ---------------------------------------------------------------------------

/// One day of a lifting split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitDay {
    pub focus: FocusCategory,
    pub label: String,
    pub movement_patterns: Vec<MovementPattern>,
    /// Consumed by the allocator's hard-run adjacency rule
    pub leg_dominant: bool,
}

impl SplitDay {
    fn new(focus: FocusCategory, label: &str, patterns: Vec<MovementPattern>) -> Self {
        Self {
            focus,
            label: label.to_string(),
            movement_patterns: patterns,
            leg_dominant: focus.is_leg_dominant(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSplit {
    pub name: String,
    /// Stable identifier, e.g. "push_pull_legs"
    pub split_type: String,
    pub days: Vec<SplitDay>,
}

impl TrainingSplit {
    pub fn rotation_length(&self) -> u8 {
        self.days.len() as u8
    }
}

/// ---------------------------------------------------------------------------
/// Split Selection
/// ---------------------------------------------------------------------------

/// Select a lifting split for the block. Keyed by days/week:
/// 1-2 full-body A/B, 3 push/pull/legs, 4 upper/lower A/B,
/// 5+ push/pull/legs with supplemental days truncated to the day count.
pub fn select_split(config: &BlockConfig) -> TrainingSplit {
    match config.days_per_week {
        0..=2 => full_body_ab(),
        3 => push_pull_legs(),
        4 => upper_lower_ab(),
        n => extended_ppl(n),
    }
}

/// The first `count` days of lifting focus for a week, cycling the split
/// when the requested count exceeds its rotation length. Used by the
/// allocator to size its lifting rotation.
pub fn lifting_rotation(count: u8) -> Vec<SplitDay> {
    if count == 0 {
        return Vec::new();
    }
    let split = select_split(&BlockConfig {
        days_per_week: count,
        ..Default::default()
    });
    split
        .days
        .iter()
        .cycle()
        .take(count as usize)
        .cloned()
        .collect()
}

fn full_body_ab() -> TrainingSplit {
    TrainingSplit {
        name: "Full Body A/B".to_string(),
        split_type: "full_body".to_string(),
        days: vec![
            SplitDay::new(
                FocusCategory::FullBody,
                "Full Body A",
                vec![
                    MovementPattern::Squat,
                    MovementPattern::HorizontalPush,
                    MovementPattern::HorizontalPull,
                    MovementPattern::CoreBrace,
                ],
            ),
            SplitDay::new(
                FocusCategory::FullBody,
                "Full Body B",
                vec![
                    MovementPattern::Hinge,
                    MovementPattern::VerticalPush,
                    MovementPattern::VerticalPull,
                    MovementPattern::CoreBrace,
                ],
            ),
        ],
    }
}

fn push_pull_legs() -> TrainingSplit {
    TrainingSplit {
        name: "Push/Pull/Legs".to_string(),
        split_type: "push_pull_legs".to_string(),
        days: vec![
            SplitDay::new(
                FocusCategory::Push,
                "Push",
                vec![
                    MovementPattern::HorizontalPush,
                    MovementPattern::VerticalPush,
                    MovementPattern::Isolation,
                ],
            ),
            SplitDay::new(
                FocusCategory::Pull,
                "Pull",
                vec![
                    MovementPattern::HorizontalPull,
                    MovementPattern::VerticalPull,
                    MovementPattern::Isolation,
                ],
            ),
            SplitDay::new(
                FocusCategory::Legs,
                "Legs",
                vec![
                    MovementPattern::Squat,
                    MovementPattern::Hinge,
                    MovementPattern::Lunge,
                ],
            ),
        ],
    }
}

fn upper_lower_ab() -> TrainingSplit {
    TrainingSplit {
        name: "Upper/Lower A/B".to_string(),
        split_type: "upper_lower".to_string(),
        days: vec![
            SplitDay::new(
                FocusCategory::Upper,
                "Upper A",
                vec![
                    MovementPattern::HorizontalPush,
                    MovementPattern::HorizontalPull,
                    MovementPattern::VerticalPush,
                ],
            ),
            SplitDay::new(
                FocusCategory::Lower,
                "Lower A",
                vec![
                    MovementPattern::Squat,
                    MovementPattern::Lunge,
                    MovementPattern::CoreBrace,
                ],
            ),
            SplitDay::new(
                FocusCategory::Upper,
                "Upper B",
                vec![
                    MovementPattern::VerticalPull,
                    MovementPattern::HorizontalPush,
                    MovementPattern::Isolation,
                ],
            ),
            SplitDay::new(
                FocusCategory::Lower,
                "Lower B",
                vec![
                    MovementPattern::Hinge,
                    MovementPattern::Lunge,
                    MovementPattern::CoreBrace,
                ],
            ),
        ],
    }
}

/// Push/pull/legs plus supplemental upper/arms/full-body days,
/// truncated to the requested day count
fn extended_ppl(days_per_week: u8) -> TrainingSplit {
    let ppl = push_pull_legs();
    let mut days = ppl.days;
    days.push(SplitDay::new(
        FocusCategory::Upper,
        "Upper",
        vec![
            MovementPattern::HorizontalPush,
            MovementPattern::HorizontalPull,
            MovementPattern::VerticalPush,
        ],
    ));
    days.push(SplitDay::new(
        FocusCategory::Arms,
        "Arms",
        vec![MovementPattern::Isolation, MovementPattern::VerticalPull],
    ));
    days.push(SplitDay::new(
        FocusCategory::FullBody,
        "Full Body",
        vec![
            MovementPattern::Squat,
            MovementPattern::HorizontalPush,
            MovementPattern::HorizontalPull,
        ],
    ));
    days.truncate(days_per_week as usize);

    TrainingSplit {
        name: "Push/Pull/Legs + Accessories".to_string(),
        split_type: "push_pull_legs_extended".to_string(),
        days,
    }
}

/// ---------------------------------------------------------------------------
/// Periodization Templates
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodizationTemplate {
    pub name: String,
    /// Phases in block order
    pub phases: Vec<PhaseConfig>,
}

impl PeriodizationTemplate {
    /// Total template length in weeks
    pub fn total_weeks(&self) -> u8 {
        self.phases.iter().map(|p| p.duration_weeks).sum()
    }

    /// The phase covering a zero-based week of the block, with the zero-based
    /// week within that phase. Weeks past the template cycle back through it.
    pub fn phase_for_week(&self, week: u8) -> Option<(&PhaseConfig, u8)> {
        let total = self.total_weeks();
        if total == 0 {
            return None;
        }
        let mut remaining = week % total;
        for phase in &self.phases {
            if remaining < phase.duration_weeks {
                return Some((phase, remaining));
            }
            remaining -= phase.duration_weeks;
        }
        None
    }
}

/// Select the phase sequence for the block's goal. An explicit phase
/// override narrows the template to the named phase.
pub fn select_periodization(config: &BlockConfig) -> PeriodizationTemplate {
    let template = match config.goal {
        Goal::Hypertrophy => hypertrophy_template(),
        Goal::Strength => strength_template(),
        Goal::Endurance => endurance_template(),
        Goal::GeneralFitness => general_fitness_template(),
    };

    if let Some(name) = &config.phase_override {
        if let Some(phase) = template.phases.iter().find(|p| &p.name == name) {
            return PeriodizationTemplate {
                name: format!("{} ({} only)", template.name, name),
                phases: vec![phase.clone()],
            };
        }
    }

    template
}

fn phase(
    name: &str,
    weeks: u8,
    volume: f64,
    intensity: f64,
    reps: (u8, u8),
    rpe: (f64, f64),
) -> PhaseConfig {
    PhaseConfig {
        name: name.to_string(),
        duration_weeks: weeks,
        volume_multiplier: volume,
        intensity_multiplier: intensity,
        rep_min: reps.0,
        rep_max: reps.1,
        rpe_min: rpe.0,
        rpe_max: rpe.1,
    }
}

fn hypertrophy_template() -> PeriodizationTemplate {
    PeriodizationTemplate {
        name: "Hypertrophy Block".to_string(),
        phases: vec![
            phase("accumulation", 4, 1.1, 0.9, (8, 12), (7.0, 9.0)),
            phase("intensification", 3, 1.0, 1.0, (6, 10), (7.5, 9.5)),
            phase("deload", 1, 0.6, 0.8, (8, 10), (5.0, 6.5)),
        ],
    }
}

fn strength_template() -> PeriodizationTemplate {
    PeriodizationTemplate {
        name: "Strength Block".to_string(),
        phases: vec![
            phase("accumulation", 3, 1.0, 0.95, (4, 6), (7.0, 9.0)),
            phase("intensification", 4, 0.9, 1.05, (2, 5), (8.0, 9.5)),
            phase("deload", 1, 0.5, 0.85, (3, 5), (5.0, 6.0)),
        ],
    }
}

fn endurance_template() -> PeriodizationTemplate {
    PeriodizationTemplate {
        name: "Endurance Support Block".to_string(),
        phases: vec![
            phase("base", 5, 1.2, 0.85, (12, 15), (6.0, 8.0)),
            phase("build", 2, 1.0, 0.95, (8, 12), (7.0, 8.5)),
            phase("deload", 1, 0.6, 0.8, (10, 12), (5.0, 6.0)),
        ],
    }
}

fn general_fitness_template() -> PeriodizationTemplate {
    PeriodizationTemplate {
        name: "General Fitness Block".to_string(),
        phases: vec![
            phase("accumulation", 4, 1.0, 0.9, (8, 12), (6.5, 8.5)),
            phase("deload", 1, 0.6, 0.8, (8, 10), (5.0, 6.0)),
        ],
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
