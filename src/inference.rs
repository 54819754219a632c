//! Program inference from historical behavior
//!
//! Once pattern detection has classified a split with enough confidence,
//! this module reconstructs a structured program mirroring what the user has
//! actually been doing: per-day focus, muscle groups, and a ranked list of
//! habitual exercises with typical sets/reps/load.
//!
//! Below the readiness gate the result is a structured "not ready" carrying
//! the exact shortfall counts. Inference never guesses with thin data and
//! never raises an error for it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogError, WorkoutHistory};
use crate::models::inference::{
    DetectedPattern, InferredExercise, InferredProgram, InferredWorkoutDay, PatternToProgramResult,
};
use crate::models::session::FocusCategory;
use crate::models::workout::WorkoutLog;
use crate::patterns::{self, normalize_focus};

/// ---------------------------------------------------------------------------
/// Inference Configuration
/// ---------------------------------------------------------------------------

/// Tunable thresholds for the readiness gate and exercise inclusion.
/// The defaults are heuristics, not derived invariants, so they stay
/// configurable rather than hard-coded at call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Completed sessions required before inference is attempted
    pub min_workouts_for_inference: u32,
    /// Calendar days of history required
    pub min_days_tracking: u32,
    /// Split-pattern confidence required to offer a program
    pub min_confidence_to_offer: f64,
    /// Share of matching sessions an exercise must appear in
    pub exercise_frequency_threshold: f64,
    /// Cap on exercises kept per inferred day
    pub max_exercises_per_day: usize,
    /// Assumed minimum recovery before a focus repeats in rotation
    pub min_rotation_rest_days: i64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_workouts_for_inference: 6,
            min_days_tracking: 10,
            min_confidence_to_offer: 0.6,
            exercise_frequency_threshold: 0.3,
            max_exercises_per_day: 8,
            min_rotation_rest_days: 2,
        }
    }
}

/// ---------------------------------------------------------------------------
/// Inference Entry Point
/// ---------------------------------------------------------------------------

/// Reconstruct a structured program from detected patterns and history.
/// `today` is caller-supplied so the readiness math has no clock dependence.
pub fn infer_program(
    patterns: &[DetectedPattern],
    history: &[WorkoutLog],
    today: NaiveDate,
    config: &InferenceConfig,
) -> PatternToProgramResult {
    let window = patterns::recent_window(history);
    let workout_count = window.len() as u32;
    let days_tracked = window
        .iter()
        .map(|w| w.completed_at)
        .min()
        .map(|oldest| (today - oldest).num_days().max(0) as u32)
        .unwrap_or(0);

    let workouts_needed = config.min_workouts_for_inference.saturating_sub(workout_count);
    let days_needed = config.min_days_tracking.saturating_sub(days_tracked);
    if workouts_needed > 0 || days_needed > 0 {
        debug!(
            workout_count,
            days_tracked, "inference gate not met, returning not-ready"
        );
        return PatternToProgramResult::not_ready(
            shortfall_reason(workouts_needed, days_needed),
            workouts_needed,
            days_needed,
        );
    }

    let Some(split) = best_split_pattern(patterns) else {
        return PatternToProgramResult::not_ready(
            "No recognizable training split in your history yet".to_string(),
            0,
            0,
        );
    };

    if split.confidence < config.min_confidence_to_offer {
        return PatternToProgramResult::not_ready(
            format!(
                "Split pattern confidence is too low to offer a program ({:.0}% of {:.0}% needed)",
                split.confidence * 100.0,
                config.min_confidence_to_offer * 100.0
            ),
            0,
            0,
        );
    }

    let split_days = split_day_labels(split);
    let days: Vec<InferredWorkoutDay> = split_days
        .iter()
        .map(|focus| infer_workout_day(*focus, &window, config))
        .collect();

    let days_per_week = split.data["days_per_week"]
        .as_u64()
        .map(|d| d as u8)
        .unwrap_or(split_days.len() as u8);
    let weeks_of_data = days_tracked.div_ceil(7);

    let summary = format!(
        "Detected a {} split across {} workouts over {} weeks of training",
        split.name, workout_count, weeks_of_data
    );
    let highlights = build_highlights(&days);

    PatternToProgramResult::ready(InferredProgram {
        split_name: split.name.clone(),
        split_type: split.data["split_type"]
            .as_str()
            .unwrap_or("unknown")
            .to_string(),
        days_per_week,
        rotation_length: split_days.len() as u8,
        days,
        confidence: split.confidence,
        workouts_analyzed: workout_count,
        weeks_of_data,
        summary,
        highlights,
    })
}

/// Fetch recent logs through the history boundary, detect patterns, and
/// run inference over them. The sync path above stays available for callers
/// that already hold the logs.
pub async fn infer_program_from_history(
    history: &dyn WorkoutHistory,
    today: NaiveDate,
    config: &InferenceConfig,
) -> Result<PatternToProgramResult, CatalogError> {
    let logs = history
        .list_workouts(patterns::DETECTION_WINDOW, None)
        .await?;
    let detected = patterns::detect_patterns(&logs);
    Ok(infer_program(&detected, &logs, today, config))
}

fn shortfall_reason(workouts_needed: u32, days_needed: u32) -> String {
    match (workouts_needed > 0, days_needed > 0) {
        (true, true) => format!(
            "Need {} more completed workouts and {} more days of tracking",
            workouts_needed, days_needed
        ),
        (true, false) => format!("Need {} more completed workouts", workouts_needed),
        (false, true) => format!("Need {} more days of tracking", days_needed),
        (false, false) => String::new(),
    }
}

/// Highest-confidence training split among the detected patterns
fn best_split_pattern(patterns: &[DetectedPattern]) -> Option<&DetectedPattern> {
    patterns
        .iter()
        .filter(|p| p.pattern_type == "training_split")
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn split_day_labels(pattern: &DetectedPattern) -> Vec<FocusCategory> {
    pattern.data["split_days"]
        .as_array()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|l| l.as_str())
                .filter_map(|l| l.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// ---------------------------------------------------------------------------
/// Per-Focus Exercise Inference
/// ---------------------------------------------------------------------------

#[derive(Default)]
struct ExerciseStats {
    appearances: u32,
    total_sets: u32,
    rep_min: u8,
    rep_max: u8,
    loads: Vec<f64>,
    last_performed: Option<NaiveDate>,
}

fn infer_workout_day(
    focus: FocusCategory,
    window: &[&WorkoutLog],
    config: &InferenceConfig,
) -> InferredWorkoutDay {
    let matching: Vec<&&WorkoutLog> = window
        .iter()
        .filter(|w| normalize_focus(&w.focus) == Some(focus))
        .collect();

    // BTreeMap keeps exercise iteration deterministic
    let mut stats: BTreeMap<String, ExerciseStats> = BTreeMap::new();
    for session in &matching {
        for name in session.exercise_names() {
            let entry = stats.entry(name.to_string()).or_default();
            entry.appearances += 1;
            if entry
                .last_performed
                .is_none_or(|d| session.completed_at > d)
            {
                entry.last_performed = Some(session.completed_at);
            }
            for set in session.sets.iter().filter(|s| !s.warmup && s.exercise_name == name) {
                entry.total_sets += 1;
                if entry.rep_min == 0 || set.reps < entry.rep_min {
                    entry.rep_min = set.reps;
                }
                if set.reps > entry.rep_max {
                    entry.rep_max = set.reps;
                }
                if let Some(load) = set.weight_kg {
                    entry.loads.push(load);
                }
            }
        }
    }

    let mut exercises: Vec<InferredExercise> = stats
        .into_iter()
        .filter_map(|(name, s)| {
            let frequency = s.appearances as f64 / matching.len().max(1) as f64;
            if frequency < config.exercise_frequency_threshold {
                return None;
            }
            let typical_sets =
                (s.total_sets as f64 / s.appearances.max(1) as f64).round() as u8;
            let typical_load_kg = if s.loads.is_empty() {
                None
            } else {
                Some(s.loads.iter().sum::<f64>() / s.loads.len() as f64)
            };
            Some(InferredExercise {
                exercise_name: name,
                frequency,
                typical_sets,
                typical_rep_range: format!("{}-{}", s.rep_min, s.rep_max),
                typical_load_kg,
                last_performed: s.last_performed,
            })
        })
        .collect();

    // Most habitual first; name breaks frequency ties deterministically
    exercises.sort_by(|a, b| {
        b.frequency
            .partial_cmp(&a.frequency)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
    });
    exercises.truncate(config.max_exercises_per_day);

    InferredWorkoutDay {
        focus,
        label: format!("{} Day", focus.label()),
        muscle_groups: focus_muscle_groups(focus),
        exercises,
    }
}

fn focus_muscle_groups(focus: FocusCategory) -> Vec<String> {
    let groups: &[&str] = match focus {
        FocusCategory::Push => &["chest", "shoulders", "triceps"],
        FocusCategory::Pull => &["back", "biceps"],
        FocusCategory::Legs => &["quads", "hamstrings", "glutes"],
        FocusCategory::Upper => &["chest", "back", "shoulders", "arms"],
        FocusCategory::Lower => &["quads", "hamstrings", "glutes", "calves"],
        FocusCategory::FullBody => &["full body"],
        FocusCategory::Arms => &["biceps", "triceps"],
        FocusCategory::Shoulders => &["shoulders"],
        FocusCategory::Core => &["core"],
        FocusCategory::Conditioning => &["cardiovascular"],
    };
    groups.iter().map(|g| g.to_string()).collect()
}

fn build_highlights(days: &[InferredWorkoutDay]) -> Vec<String> {
    days.iter()
        .filter_map(|day| {
            day.exercises.first().map(|top| {
                format!(
                    "{} anchored by {} ({:.0}% of sessions)",
                    day.label,
                    top.exercise_name,
                    top.frequency * 100.0
                )
            })
        })
        .collect()
}

/// ---------------------------------------------------------------------------
/// Rotation Prediction
/// ---------------------------------------------------------------------------

/// The next focus due in the rotation: the most overdue focus whose last
/// occurrence is at least the minimum recovery in the past. A focus never
/// logged at all is nominated immediately - cold start beats freshness.
pub fn next_in_rotation(
    split_days: &[FocusCategory],
    history: &[WorkoutLog],
    today: NaiveDate,
    config: &InferenceConfig,
) -> Option<FocusCategory> {
    let window = patterns::recent_window(history);

    let mut best: Option<(FocusCategory, i64)> = None;
    for focus in split_days {
        let last = window
            .iter()
            .filter(|w| normalize_focus(&w.focus) == Some(*focus))
            .map(|w| w.completed_at)
            .max();

        let Some(last) = last else {
            return Some(*focus);
        };

        let days_since = (today - last).num_days();
        if days_since >= config.min_rotation_rest_days
            && best.is_none_or(|(_, overdue)| days_since > overdue)
        {
            best = Some((*focus, days_since));
        }
    }
    best.map(|(focus, _)| focus)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::detect_patterns;
    use crate::test_utils::{anchor_today, ppl_history, workout, StubHistory};

    fn infer(history: &[WorkoutLog]) -> PatternToProgramResult {
        let patterns = detect_patterns(history);
        infer_program(&patterns, history, anchor_today(), &InferenceConfig::default())
    }

    #[test]
    fn test_not_ready_below_workout_threshold() {
        let history = ppl_history(4, 12);
        let result = infer(&history);
        assert!(!result.ready);
        assert_eq!(result.workouts_needed, 2);
        assert_eq!(result.days_needed, 0);
        assert!(result.reason.contains("2 more completed workouts"));
        assert!(result.program.is_none());
    }

    #[test]
    fn test_not_ready_below_days_threshold() {
        let history = ppl_history(7, 6);
        let result = infer(&history);
        assert!(!result.ready);
        assert_eq!(result.workouts_needed, 0);
        assert_eq!(result.days_needed, 4);
    }

    #[test]
    fn test_empty_history_never_panics() {
        let result = infer(&[]);
        assert!(!result.ready);
        assert_eq!(result.workouts_needed, 6);
        assert_eq!(result.days_needed, 10);
    }

    #[test]
    fn test_ready_once_both_thresholds_met() {
        // Eight workouts over 14 days cycling push/pull/legs
        let history = ppl_history(8, 14);
        let result = infer(&history);
        assert!(result.ready, "expected ready, got: {}", result.reason);

        let program = result.program.unwrap();
        assert_eq!(program.split_type, "push_pull_legs");
        assert_eq!(program.rotation_length, 3);
        assert_eq!(program.workouts_analyzed, 8);
        assert_eq!(program.weeks_of_data, 2);
        assert!(program.confidence >= 0.6);
        assert!(!program.summary.is_empty());
        assert!(!program.highlights.is_empty());
    }

    #[test]
    fn test_low_confidence_is_not_ready() {
        // All three split categories appear, but the bulk of the history is
        // unrelated work, so regularity drags confidence under the gate
        let mut history = vec![
            workout(16, "Push Day", &[]),
            workout(15, "Pull Day", &[]),
            workout(14, "Leg Day", &[]),
        ];
        for i in 0..13 {
            let focus = ["Conditioning", "Core blast", "Shoulders", "Arm day"][i % 4];
            history.push(workout(13 - i as i64, focus, &[]));
        }
        let result = infer(&history);
        assert!(!result.ready);
        assert!(result.reason.contains("confidence"));
        assert_eq!(result.workouts_needed, 0);
    }

    #[test]
    fn test_single_category_history_is_not_ready() {
        // Plenty of volume and tracking time, but every session is a push
        // day: no split should be offered and no program returned
        let mut history = Vec::new();
        for i in 0..8 {
            history.push(workout(14 - i, "Push Day", &[("Bench Press", 8, Some(80.0))]));
        }
        let result = infer(&history);
        assert!(!result.ready, "push-only history offered: {}", result.reason);
        assert!(result.program.is_none());
    }

    #[test]
    fn test_exercise_frequency_threshold() {
        // Ten push sessions: Bench in all 10, Incline Press in exactly 3,
        // Rare Fly in exactly 2. The 30% bar admits Incline, rejects Fly.
        // Pull and leg sessions round out the split so detection fires.
        let mut history = Vec::new();
        for i in 0..10u8 {
            let mut exercises: Vec<(&str, u8, Option<f64>)> =
                vec![("Bench Press", 8, Some(80.0))];
            if i < 3 {
                exercises.push(("Incline Press", 10, Some(60.0)));
            }
            if i < 2 {
                exercises.push(("Rare Fly", 12, Some(15.0)));
            }
            history.push(workout(20 - 2 * i as i64, "Push Day", &exercises));
        }
        for i in 0..5i64 {
            history.push(workout(19 - 4 * i, "Pull Day", &[("Barbell Row", 8, Some(70.0))]));
            history.push(workout(18 - 4 * i, "Leg Day", &[("Back Squat", 6, Some(100.0))]));
        }

        let result = infer(&history);
        assert!(result.ready, "expected ready, got: {}", result.reason);
        let program = result.program.unwrap();
        let push_day = program
            .days
            .iter()
            .find(|d| d.focus == FocusCategory::Push)
            .unwrap();
        let names: Vec<&str> = push_day
            .exercises
            .iter()
            .map(|e| e.exercise_name.as_str())
            .collect();
        assert!(names.contains(&"Bench Press"));
        assert!(names.contains(&"Incline Press"), "30% exactly must qualify");
        assert!(!names.contains(&"Rare Fly"), "20% must not qualify");
    }

    #[test]
    fn test_exercises_capped_at_limit() {
        let exercise_names: Vec<String> = (0..12).map(|i| format!("Exercise {:02}", i)).collect();
        let mut history = Vec::new();
        for i in 0..8 {
            let exercises: Vec<(&str, u8, Option<f64>)> = exercise_names
                .iter()
                .map(|n| (n.as_str(), 10, Some(20.0)))
                .collect();
            history.push(workout(14 - i, "Push Day", &exercises));
        }
        for i in 0..4 {
            history.push(workout(13 - 3 * i, "Pull Day", &[]));
            history.push(workout(12 - 3 * i, "Leg Day", &[]));
        }
        let program = infer(&history).program.unwrap();
        let push_day = program
            .days
            .iter()
            .find(|d| d.focus == FocusCategory::Push)
            .unwrap();
        assert_eq!(push_day.exercises.len(), 8);
    }

    #[test]
    fn test_typical_values_from_history() {
        let history = ppl_history(9, 16);
        let program = infer(&history).program.unwrap();
        let push_day = program
            .days
            .iter()
            .find(|d| d.focus == FocusCategory::Push)
            .unwrap();
        let bench = push_day
            .exercises
            .iter()
            .find(|e| e.exercise_name == "Bench Press")
            .unwrap();
        assert_eq!(bench.frequency, 1.0);
        assert_eq!(bench.typical_sets, 3);
        assert_eq!(bench.typical_rep_range, "8-8");
        assert_eq!(bench.typical_load_kg, Some(80.0));
        assert!(bench.last_performed.is_some());
    }

    #[tokio::test]
    async fn test_infer_through_history_boundary() {
        let history = StubHistory {
            workouts: ppl_history(8, 14),
        };
        let result =
            infer_program_from_history(&history, anchor_today(), &InferenceConfig::default())
                .await
                .expect("history read");
        assert!(result.ready, "expected ready, got: {}", result.reason);
        assert_eq!(result.program.unwrap().split_type, "push_pull_legs");
    }

    #[test]
    fn test_rotation_cold_start_wins() {
        let split = [FocusCategory::Push, FocusCategory::Pull, FocusCategory::Legs];
        // Legs has never been logged
        let history = vec![
            workout(1, "Push Day", &[]),
            workout(3, "Pull Day", &[]),
        ];
        let next = next_in_rotation(&split, &history, anchor_today(), &InferenceConfig::default());
        assert_eq!(next, Some(FocusCategory::Legs));
    }

    #[test]
    fn test_rotation_picks_most_overdue() {
        let split = [FocusCategory::Push, FocusCategory::Pull, FocusCategory::Legs];
        let history = vec![
            workout(5, "Push Day", &[]),
            workout(3, "Pull Day", &[]),
            workout(1, "Leg Day", &[]),
        ];
        // Legs was yesterday (< 2-day recovery), push is most overdue
        let next = next_in_rotation(&split, &history, anchor_today(), &InferenceConfig::default());
        assert_eq!(next, Some(FocusCategory::Push));
    }

    #[test]
    fn test_rotation_respects_recovery_gate() {
        let split = [FocusCategory::Push, FocusCategory::Pull];
        let history = vec![
            workout(0, "Push Day", &[]),
            workout(1, "Pull Day", &[]),
        ];
        let next = next_in_rotation(&split, &history, anchor_today(), &InferenceConfig::default());
        assert_eq!(next, None);
    }
}
