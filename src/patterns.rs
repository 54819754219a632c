//! Pattern detection over historical workout logs
//!
//! Free-text focus labels normalize into a closed vocabulary through an
//! ordered rule table, then the normalized sequence is tested against known
//! split shapes. Confidence is a bounded heuristic score in [0,1] built from
//! category coverage and recurrence regularity - not a statistical p-value.

use serde_json::json;

use crate::models::inference::DetectedPattern;
use crate::models::session::FocusCategory;
use crate::models::workout::WorkoutLog;

/// Detection looks at a bounded recent window of history
pub const DETECTION_WINDOW: usize = 40;

/// ---------------------------------------------------------------------------
/// Focus Normalization Rules
/// ---------------------------------------------------------------------------

/// One normalization rule: any keyword substring match assigns the category.
/// Rules apply in table order, so precedence is visible here and testable.
pub struct FocusRule {
    pub keywords: &'static [&'static str],
    pub category: FocusCategory,
}

/// Split-level labels outrank day-level ones ("Upper Push" is an upper day),
/// and body-part labels come last.
pub const FOCUS_RULES: &[FocusRule] = &[
    FocusRule {
        keywords: &["full body", "full-body", "total body"],
        category: FocusCategory::FullBody,
    },
    FocusRule {
        keywords: &["upper"],
        category: FocusCategory::Upper,
    },
    FocusRule {
        keywords: &["lower"],
        category: FocusCategory::Lower,
    },
    FocusRule {
        keywords: &["push", "chest", "bench"],
        category: FocusCategory::Push,
    },
    FocusRule {
        keywords: &["pull", "back", "row"],
        category: FocusCategory::Pull,
    },
    FocusRule {
        keywords: &["leg", "quad", "squat"],
        category: FocusCategory::Legs,
    },
    FocusRule {
        keywords: &["shoulder", "delt"],
        category: FocusCategory::Shoulders,
    },
    FocusRule {
        keywords: &["arm", "bicep", "tricep"],
        category: FocusCategory::Arms,
    },
    FocusRule {
        keywords: &["core", "abs"],
        category: FocusCategory::Core,
    },
    FocusRule {
        keywords: &["conditioning", "cardio", "metcon", "hiit"],
        category: FocusCategory::Conditioning,
    },
];

/// Normalize a free-text focus label into the closed vocabulary.
/// Returns `None` when no rule matches.
pub fn normalize_focus(raw: &str) -> Option<FocusCategory> {
    let lowered = raw.to_lowercase();
    for rule in FOCUS_RULES {
        if rule.keywords.iter().any(|k| lowered.contains(k)) {
            return Some(rule.category);
        }
    }
    None
}

/// ---------------------------------------------------------------------------
/// Split Shapes
/// ---------------------------------------------------------------------------

struct SplitShape {
    split_type: &'static str,
    name: &'static str,
    expected: &'static [FocusCategory],
}

const SPLIT_SHAPES: &[SplitShape] = &[
    SplitShape {
        split_type: "push_pull_legs",
        name: "Push/Pull/Legs",
        expected: &[FocusCategory::Push, FocusCategory::Pull, FocusCategory::Legs],
    },
    SplitShape {
        split_type: "upper_lower",
        name: "Upper/Lower",
        expected: &[FocusCategory::Upper, FocusCategory::Lower],
    },
    SplitShape {
        split_type: "full_body",
        name: "Full Body",
        expected: &[FocusCategory::FullBody],
    },
];

/// ---------------------------------------------------------------------------
/// Detection
/// ---------------------------------------------------------------------------

/// Classify recurring patterns in the history. Currently detects the
/// training split; an empty or unrecognizable history yields no patterns.
pub fn detect_patterns(history: &[WorkoutLog]) -> Vec<DetectedPattern> {
    let window = recent_window(history);
    if window.is_empty() {
        return Vec::new();
    }

    let focuses: Vec<FocusCategory> = window
        .iter()
        .filter_map(|w| normalize_focus(&w.focus))
        .collect();
    if focuses.is_empty() {
        return Vec::new();
    }

    let mut best: Option<(&SplitShape, f64)> = None;
    for shape in SPLIT_SHAPES {
        let confidence = shape_confidence(shape, &focuses);
        // Strictly-greater keeps earlier (more specific) shapes on ties
        if best.is_none_or(|(_, c)| confidence > c) {
            best = Some((shape, confidence));
        }
    }

    let mut patterns = Vec::new();
    if let Some((shape, confidence)) = best {
        if confidence > 0.0 {
            patterns.push(DetectedPattern {
                pattern_type: "training_split".to_string(),
                name: shape.name.to_string(),
                confidence,
                data: json!({
                    "split_type": shape.split_type,
                    "split_days": shape.expected.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                    "days_per_week": infer_days_per_week(&window),
                }),
            });
        }
    }
    patterns
}

/// A shape only scores once every expected category appears in the window;
/// a history of nothing but push days is not a push/pull/legs split.
/// Regularity then measures how much of the normalized history falls
/// inside the shape.
fn shape_confidence(shape: &SplitShape, focuses: &[FocusCategory]) -> f64 {
    let present = shape
        .expected
        .iter()
        .filter(|e| focuses.contains(e))
        .count();
    if present < shape.expected.len() {
        return 0.0;
    }

    let matching = focuses
        .iter()
        .filter(|f| shape.expected.contains(f))
        .count();
    let regularity = matching as f64 / focuses.len() as f64;

    (0.5 + 0.5 * regularity).clamp(0.0, 1.0)
}

/// Sessions per week over the span of the window, clamped to 1-7
fn infer_days_per_week(window: &[&WorkoutLog]) -> u8 {
    let Some(newest) = window.iter().map(|w| w.completed_at).max() else {
        return 1;
    };
    let Some(oldest) = window.iter().map(|w| w.completed_at).min() else {
        return 1;
    };
    let span_days = (newest - oldest).num_days().max(1) as f64;
    let weeks = (span_days / 7.0).max(1.0);
    ((window.len() as f64 / weeks).round() as u8).clamp(1, 7)
}

/// Most recent sessions first, bounded to the detection window
pub(crate) fn recent_window(history: &[WorkoutLog]) -> Vec<&WorkoutLog> {
    let mut sorted: Vec<&WorkoutLog> = history.iter().collect();
    sorted.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    sorted.truncate(DETECTION_WINDOW);
    sorted
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
