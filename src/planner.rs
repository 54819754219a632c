//! Weekly plan assembly
//!
//! Orchestrates the pure allocator with the async boundary: once sessions
//! are allocated, each lifting day's movement patterns resolve to concrete
//! exercises through the caller's catalog, with set prescriptions from the
//! current phase and load guidance from movement memory when available.
//!
//! A missing catalog match omits that exercise slot; it never fails the
//! plan. Lookups are read-only and mutually independent, so the sequential
//! order here is about deterministic output, not correctness.

use tracing::debug;

use crate::allocator::{self, WeekContext};
use crate::catalog::{CatalogError, ExerciseCatalog, MovementMemory, MovementMemoryEntry};
use crate::models::block::{BlockConfig, PhaseConfig};
use crate::models::plan::{PlannedExercise, WeeklyPlan};
use crate::models::session::ExperienceLevel;
use crate::models::targets::{RunningSchedule, WeeklyTargets};
use crate::prescription::generate_sets;
use crate::splits::SplitDay;

/// ---------------------------------------------------------------------------
/// Plan Options
/// ---------------------------------------------------------------------------

/// Everything beyond the weekly targets that shapes the lifting content
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub phase: PhaseConfig,
    /// Zero-based week within the phase
    pub week_in_phase: u8,
    pub experience: ExperienceLevel,
    /// Exercises the user wants to avoid, excluded from every lookup
    pub aversions: Vec<String>,
}

impl PlanOptions {
    /// Derive options from a block config and the zero-based week of the
    /// block, using the goal's periodization template.
    pub fn for_block(config: &BlockConfig, week_of_block: u8) -> Self {
        let template = crate::splits::select_periodization(config);
        let (phase, week_in_phase) = match template.phase_for_week(week_of_block) {
            Some((phase, week)) => (phase.clone(), week),
            None => (fallback_phase(), 0),
        };
        Self {
            phase,
            week_in_phase,
            experience: config.experience,
            aversions: Vec::new(),
        }
    }
}

/// Only reachable with an empty periodization template
fn fallback_phase() -> PhaseConfig {
    PhaseConfig {
        name: "accumulation".to_string(),
        duration_weeks: 4,
        volume_multiplier: 1.0,
        intensity_multiplier: 0.9,
        rep_min: 8,
        rep_max: 12,
        rpe_min: 6.5,
        rpe_max: 8.5,
    }
}

/// ---------------------------------------------------------------------------
/// Plan Assembly
/// ---------------------------------------------------------------------------

/// Allocate the week and populate lifting days with exercises.
pub async fn build_weekly_plan(
    targets: &WeeklyTargets,
    running_schedule: Option<&RunningSchedule>,
    ctx: &WeekContext,
    opts: &PlanOptions,
    catalog: &dyn ExerciseCatalog,
    memory: Option<&dyn MovementMemory>,
) -> Result<(WeeklyPlan, Vec<String>), CatalogError> {
    let (mut plan, warnings) = allocator::allocate_week_sessions(targets, running_schedule, ctx);

    // The allocator attaches the placed split day to each lifting slot, so
    // truncation or swaps during placement cannot desync the lookup here
    for day in &mut plan.days {
        let Some(split_day) = day.split_day.clone() else {
            continue;
        };
        day.exercises = resolve_exercises(&split_day, opts, catalog, memory).await?;
    }

    Ok((plan, warnings))
}

async fn resolve_exercises(
    split_day: &SplitDay,
    opts: &PlanOptions,
    catalog: &dyn ExerciseCatalog,
    memory: Option<&dyn MovementMemory>,
) -> Result<Vec<PlannedExercise>, CatalogError> {
    let mut exercises = Vec::with_capacity(split_day.movement_patterns.len());

    for pattern in &split_day.movement_patterns {
        let found = catalog.find_by_pattern(*pattern, &opts.aversions).await?;
        let Some(exercise) = found else {
            // Missing reference data omits the slot, never the day
            debug!(pattern = %pattern, "no exercise for pattern, omitting slot");
            continue;
        };

        let is_compound = pattern.is_compound();
        let sets = generate_sets(&opts.phase, is_compound, opts.experience, opts.week_in_phase);
        let load_guidance = match memory {
            Some(memory) => guidance_text(memory.last_known(&exercise.name).await?),
            None => guidance_text(None),
        };
        let progression_note = if is_compound && opts.phase.name != "deload" {
            Some("Add a rep or 2.5kg once every set hits the top of the range".to_string())
        } else {
            None
        };

        exercises.push(PlannedExercise {
            exercise,
            sets,
            rep_range: opts.phase.rep_range_text(),
            load_guidance,
            progression_note,
            locked: false,
        });
    }

    Ok(exercises)
}

fn guidance_text(entry: Option<MovementMemoryEntry>) -> String {
    match entry {
        Some(entry) => {
            let qualifier = entry
                .confidence_label
                .map(|l| format!(" ({})", l))
                .unwrap_or_default();
            format!(
                "Last time: {:.1}kg x {}{}",
                entry.weight_kg, entry.reps, qualifier
            )
        }
        None => "Start with a comfortable weight".to_string(),
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{DayOfWeek, Goal, MovementPattern};
    use crate::models::targets::SessionRange;
    use crate::test_utils::{StubCatalog, StubMemory};
    use chrono::NaiveDate;

    fn ctx() -> WeekContext {
        WeekContext {
            week_start: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            phase: "accumulation".to_string(),
        }
    }

    fn targets() -> WeeklyTargets {
        WeeklyTargets {
            hypertrophy: SessionRange::new(3, 3),
            zone2: SessionRange::new(0, 0),
            rest_days: 1,
            ..Default::default()
        }
    }

    fn opts() -> PlanOptions {
        PlanOptions::for_block(
            &BlockConfig {
                goal: Goal::Hypertrophy,
                days_per_week: 3,
                ..Default::default()
            },
            0,
        )
    }

    #[tokio::test]
    async fn test_lifting_days_get_exercises() {
        let catalog = StubCatalog::full();
        let (plan, warnings) =
            build_weekly_plan(&targets(), None, &ctx(), &opts(), &catalog, None)
                .await
                .expect("plan built");

        assert!(warnings.is_empty());
        let lift_days: Vec<_> = plan.days.iter().filter(|d| d.session.is_lift()).collect();
        assert_eq!(lift_days.len(), 3);
        for day in lift_days {
            assert!(!day.exercises.is_empty(), "{} has no exercises", day.day);
            for ex in &day.exercises {
                assert!(!ex.sets.is_empty());
                assert_eq!(ex.rep_range, "8-12");
                assert!(!ex.locked);
            }
        }
        // Non-lifting days carry none
        assert!(plan.day(DayOfWeek::Sunday).unwrap().exercises.is_empty());
    }

    #[tokio::test]
    async fn test_missing_pattern_omits_slot_only() {
        let catalog = StubCatalog::without(MovementPattern::Squat);
        let (plan, _) = build_weekly_plan(&targets(), None, &ctx(), &opts(), &catalog, None)
            .await
            .expect("plan built");

        // The legs day loses its squat slot but keeps the rest of the day
        let legs = plan
            .days
            .iter()
            .find(|d| d.focus.as_deref() == Some("Legs"))
            .expect("legs day planned");
        assert_eq!(legs.exercises.len(), 2);
        assert!(legs
            .exercises
            .iter()
            .all(|e| e.exercise.movement_pattern != MovementPattern::Squat));
    }

    #[tokio::test]
    async fn test_truncated_lifting_week_still_gets_exercises() {
        // A 3-4 lifting target with only three available days: the allocator
        // places a truncated rotation with a shortfall warning, and every
        // placed lifting day must still resolve exercises.
        let catalog = StubCatalog::full();
        let targets = WeeklyTargets {
            hypertrophy: SessionRange::new(3, 4),
            zone2: SessionRange::new(0, 0),
            rest_days: 1,
            available_days: vec![DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Wednesday],
            ..Default::default()
        };
        let (plan, warnings) = build_weekly_plan(&targets, None, &ctx(), &opts(), &catalog, None)
            .await
            .expect("plan built");

        assert!(warnings.iter().any(|w| w.contains("lifting")));
        let lifts: Vec<_> = plan.days.iter().filter(|d| d.session.is_lift()).collect();
        assert_eq!(lifts.len(), 3);
        for day in lifts {
            assert!(
                !day.exercises.is_empty(),
                "{} planned with focus {:?} but no exercises",
                day.day,
                day.focus
            );
        }
    }

    #[tokio::test]
    async fn test_aversions_excluded_from_lookups() {
        let catalog = StubCatalog::full();
        let mut opts = opts();
        opts.aversions = vec!["Bench Press".to_string()];
        let (plan, _) = build_weekly_plan(&targets(), None, &ctx(), &opts, &catalog, None)
            .await
            .expect("plan built");

        for day in &plan.days {
            assert!(day
                .exercises
                .iter()
                .all(|e| e.exercise.name != "Bench Press"));
        }
    }

    #[tokio::test]
    async fn test_memory_enriches_load_guidance() {
        let catalog = StubCatalog::full();
        let memory = StubMemory {
            exercise_name: "Bench Press".to_string(),
            entry: MovementMemoryEntry {
                weight_kg: 82.5,
                reps: 8,
                confidence_label: Some("confident".to_string()),
            },
        };
        let (plan, _) = build_weekly_plan(
            &targets(),
            None,
            &ctx(),
            &opts(),
            &catalog,
            Some(&memory),
        )
        .await
        .expect("plan built");

        let bench = plan
            .days
            .iter()
            .flat_map(|d| &d.exercises)
            .find(|e| e.exercise.name == "Bench Press")
            .expect("bench planned");
        assert_eq!(bench.load_guidance, "Last time: 82.5kg x 8 (confident)");

        // Everything else falls back gracefully
        let other = plan
            .days
            .iter()
            .flat_map(|d| &d.exercises)
            .find(|e| e.exercise.name != "Bench Press")
            .expect("other exercise planned");
        assert_eq!(other.load_guidance, "Start with a comfortable weight");
    }

    #[tokio::test]
    async fn test_compounds_get_progression_note() {
        let catalog = StubCatalog::full();
        let (plan, _) = build_weekly_plan(&targets(), None, &ctx(), &opts(), &catalog, None)
            .await
            .expect("plan built");

        let legs = plan
            .days
            .iter()
            .find(|d| d.focus.as_deref() == Some("Legs"))
            .unwrap();
        let squat = legs
            .exercises
            .iter()
            .find(|e| e.exercise.movement_pattern == MovementPattern::Squat)
            .unwrap();
        assert!(squat.progression_note.is_some());
    }

    #[tokio::test]
    async fn test_deload_week_skips_progression_note() {
        let catalog = StubCatalog::full();
        let opts = PlanOptions::for_block(
            &BlockConfig {
                goal: Goal::Hypertrophy,
                days_per_week: 3,
                phase_override: Some("deload".to_string()),
                ..Default::default()
            },
            0,
        );
        let (plan, _) = build_weekly_plan(&targets(), None, &ctx(), &opts, &catalog, None)
            .await
            .expect("plan built");
        for ex in plan.days.iter().flat_map(|d| &d.exercises) {
            assert!(ex.progression_note.is_none());
        }
    }
}
