//! Set/rep prescription generation
//!
//! Pure functions from phase configuration to concrete set lists. Never
//! touches history or persistence; progressive overload within a phase
//! comes from nudging target RPE upward as the weeks advance.

use crate::models::block::PhaseConfig;
use crate::models::plan::PrescribedSet;
use crate::models::session::ExperienceLevel;

/// RPE step applied per week within a phase
const RPE_STEP_PER_WEEK: f64 = 0.5;

/// Fixed effort ceiling for warm-up work
const WARMUP_RPE: f64 = 5.0;

/// Generate warm-up plus working sets for one exercise slot.
///
/// `week_in_phase` is zero-based. Working-set count derives from the phase's
/// volume multiplier, target reps from its rep bounds, and target RPE from
/// its RPE floor nudged upward each week and capped at the ceiling.
pub fn generate_sets(
    phase: &PhaseConfig,
    is_compound: bool,
    experience: ExperienceLevel,
    week_in_phase: u8,
) -> Vec<PrescribedSet> {
    let warmup_count = warmup_sets(is_compound, experience);
    let working_count = working_sets(phase, is_compound, experience);
    let target_reps = working_reps(phase);
    let target_rpe = working_rpe(phase, week_in_phase);
    let tempo = tempo_cue(phase, is_compound);

    let mut sets = Vec::with_capacity(warmup_count as usize + working_count as usize);
    for i in 0..warmup_count {
        sets.push(PrescribedSet {
            set_number: i + 1,
            target_reps: phase.rep_max,
            target_rpe: WARMUP_RPE.min(target_rpe),
            is_warmup: true,
            tempo: None,
        });
    }
    for i in 0..working_count {
        sets.push(PrescribedSet {
            set_number: warmup_count + i + 1,
            target_reps,
            target_rpe,
            is_warmup: false,
            tempo: tempo.clone(),
        });
    }
    sets
}

/// Compounds get more warm-up ramping than accessories
fn warmup_sets(is_compound: bool, experience: ExperienceLevel) -> u8 {
    match (is_compound, experience) {
        (true, ExperienceLevel::Beginner) => 2,
        (true, _) => 3,
        (false, _) => 1,
    }
}

fn working_sets(phase: &PhaseConfig, is_compound: bool, experience: ExperienceLevel) -> u8 {
    let base: f64 = if is_compound { 4.0 } else { 3.0 };
    let mut count = (base * phase.volume_multiplier).round() as i8;
    match experience {
        ExperienceLevel::Beginner => count -= 1,
        ExperienceLevel::Advanced => count += 1,
        ExperienceLevel::Intermediate => {}
    }
    count.clamp(2, 6) as u8
}

/// Rounded midpoint of the phase's rep bounds
fn working_reps(phase: &PhaseConfig) -> u8 {
    (phase.rep_min + phase.rep_max).div_ceil(2)
}

fn working_rpe(phase: &PhaseConfig, week_in_phase: u8) -> f64 {
    let nudged = phase.rpe_min + RPE_STEP_PER_WEEK * week_in_phase as f64;
    // Round to the nearest half point before capping
    let rounded = (nudged * 2.0).round() / 2.0;
    rounded.min(phase.rpe_max)
}

/// Controlled tempo on accessory work in hypertrophy rep ranges
fn tempo_cue(phase: &PhaseConfig, is_compound: bool) -> Option<String> {
    if !is_compound && phase.rep_max >= 10 {
        Some("3-1-1".to_string())
    } else {
        None
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
