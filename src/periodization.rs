//! Block-level periodization across the training year
//!
//! Two entry points: `recommend_blocks` answers "what block should come
//! next" from the current phase and recent block history, and
//! `generate_timeline` lays fixed-length blocks across a date horizon,
//! inserting deloads on a cadence and anchoring a taper before each
//! competition. Both are deterministic rule walks over their inputs.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::session::Goal;

/// ---------------------------------------------------------------------------
/// Block Types & Competitions
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Accumulation,
    Intensification,
    Deload,
    Taper,
}

impl BlockType {
    /// Deloads and tapers reset accumulated fatigue
    pub fn is_recovery(&self) -> bool {
        matches!(self, BlockType::Deload | BlockType::Taper)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Accumulation => "accumulation",
            BlockType::Intensification => "intensification",
            BlockType::Deload => "deload",
            BlockType::Taper => "taper",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionPriority {
    Primary,
    Secondary,
    TuneUp,
}

impl CompetitionPriority {
    /// Lower rank wins taper conflicts
    fn rank(&self) -> u8 {
        match self {
            CompetitionPriority::Primary => 0,
            CompetitionPriority::Secondary => 1,
            CompetitionPriority::TuneUp => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub name: String,
    pub date: NaiveDate,
    pub priority: CompetitionPriority,
}

/// ---------------------------------------------------------------------------
/// Block Durations
/// ---------------------------------------------------------------------------

const ACCUMULATION_WEEKS: u8 = 4;
const INTENSIFICATION_WEEKS: u8 = 3;
const DELOAD_WEEKS: u8 = 1;
const TAPER_WEEKS: u8 = 2;

fn work_block_weeks(block: BlockType) -> u8 {
    match block {
        BlockType::Accumulation => ACCUMULATION_WEEKS,
        BlockType::Intensification => INTENSIFICATION_WEEKS,
        BlockType::Deload => DELOAD_WEEKS,
        BlockType::Taper => TAPER_WEEKS,
    }
}

/// Endurance and general-fitness blocks repeat accumulation; strength and
/// hypertrophy alternate accumulation with intensification.
fn next_work_block(goal: Goal, previous_work: Option<BlockType>) -> BlockType {
    match goal {
        Goal::Endurance | Goal::GeneralFitness => BlockType::Accumulation,
        Goal::Hypertrophy | Goal::Strength => match previous_work {
            Some(BlockType::Accumulation) => BlockType::Intensification,
            _ => BlockType::Accumulation,
        },
    }
}

/// ---------------------------------------------------------------------------
/// Block Recommendation
/// ---------------------------------------------------------------------------

/// Where the athlete stands right now, for a single recommendation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockContext {
    pub today: NaiveDate,
    /// Phase label of the block in progress, e.g. "accumulation"
    pub current_phase: String,
    pub weeks_in_phase: u8,
    pub next_competition: Option<Competition>,
    /// Most recent last
    pub recent_blocks: Vec<BlockType>,
    pub goal: Goal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecommendation {
    pub block: BlockType,
    pub duration_weeks: u8,
    pub reason: String,
}

/// Work blocks tolerated before a deload becomes the recommendation
const WORK_BLOCKS_BEFORE_DELOAD: usize = 3;

/// Recommend the next block(s), most urgent first. A competition inside the
/// taper window outranks everything; accumulated work blocks without a
/// recovery block outrank normal phase progression.
pub fn recommend_blocks(ctx: &BlockContext) -> Vec<BlockRecommendation> {
    let mut recs = Vec::new();

    if let Some(comp) = &ctx.next_competition {
        let days_out = (comp.date - ctx.today).num_days();
        if days_out >= 0 && days_out <= i64::from(TAPER_WEEKS) * 7 {
            let weeks = (days_out.div_euclid(7).max(1)) as u8;
            recs.push(BlockRecommendation {
                block: BlockType::Taper,
                duration_weeks: weeks.min(TAPER_WEEKS),
                reason: format!("{} is {} days out", comp.name, days_out),
            });
            return recs;
        }
    }

    let work_streak = ctx
        .recent_blocks
        .iter()
        .rev()
        .take_while(|b| !b.is_recovery())
        .count();
    if work_streak >= WORK_BLOCKS_BEFORE_DELOAD {
        recs.push(BlockRecommendation {
            block: BlockType::Deload,
            duration_weeks: DELOAD_WEEKS,
            reason: format!("{} work blocks since the last recovery block", work_streak),
        });
    }

    let previous_work = ctx
        .recent_blocks
        .iter()
        .rev()
        .find(|b| !b.is_recovery())
        .copied();
    let progression = match ctx.current_phase.as_str() {
        "accumulation" if ctx.weeks_in_phase >= ACCUMULATION_WEEKS => BlockRecommendation {
            block: next_work_block(ctx.goal, Some(BlockType::Accumulation)),
            duration_weeks: work_block_weeks(next_work_block(ctx.goal, Some(BlockType::Accumulation))),
            reason: "Accumulation phase complete".to_string(),
        },
        "intensification" if ctx.weeks_in_phase >= INTENSIFICATION_WEEKS => BlockRecommendation {
            block: BlockType::Deload,
            duration_weeks: DELOAD_WEEKS,
            reason: "Intensification phase complete".to_string(),
        },
        "deload" | "taper" => {
            let next = next_work_block(ctx.goal, previous_work);
            BlockRecommendation {
                block: next,
                duration_weeks: work_block_weeks(next),
                reason: "Recovery block finished, back to work".to_string(),
            }
        }
        phase => BlockRecommendation {
            block: previous_work.unwrap_or(BlockType::Accumulation),
            duration_weeks: work_block_weeks(previous_work.unwrap_or(BlockType::Accumulation)),
            reason: format!(
                "Continue the current {} phase ({} weeks in)",
                phase, ctx.weeks_in_phase
            ),
        },
    };
    recs.push(progression);
    recs
}

/// ---------------------------------------------------------------------------
/// Timeline Generation
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub goal: Goal,
    pub competitions: Vec<Competition>,
    /// Work blocks between scheduled deloads
    pub deload_frequency: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedBlock {
    pub block: BlockType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_weeks: u8,
    /// The competition this taper leads into
    pub competition: Option<String>,
    pub notes: Option<String>,
}

/// Lay blocks across the horizon. Deloads land after every
/// `deload_frequency` work blocks; each in-horizon competition gets a taper
/// ending on its date. When two competitions fall inside one taper window,
/// the higher-priority one anchors the taper and the other is noted on it.
pub fn generate_timeline(config: &TimelineConfig) -> Vec<PlannedBlock> {
    let mut blocks = Vec::new();
    if config.end_date <= config.start_date {
        return blocks;
    }

    let anchors = taper_anchors(config);
    let deload_frequency = config.deload_frequency.max(1);

    let mut cursor = config.start_date;
    let mut work_since_deload: u8 = 0;
    let mut previous_work: Option<BlockType> = None;
    let mut anchor_idx = 0;

    while cursor < config.end_date {
        let next_anchor = anchors.get(anchor_idx).filter(|a| a.competition.date > cursor);
        if anchors.get(anchor_idx).is_some() && next_anchor.is_none() {
            // Competition date already passed the cursor, move on
            anchor_idx += 1;
            continue;
        }

        if let Some(anchor) = next_anchor {
            let taper_start = anchor.competition.date - Duration::weeks(i64::from(TAPER_WEEKS));
            if cursor >= taper_start {
                let end = anchor.competition.date.min(config.end_date);
                blocks.push(PlannedBlock {
                    block: BlockType::Taper,
                    start_date: cursor,
                    end_date: end,
                    duration_weeks: weeks_between(cursor, end),
                    competition: Some(anchor.competition.name.clone()),
                    notes: anchor.note.clone(),
                });
                debug!(competition = %anchor.competition.name, "placed taper block");
                cursor = end;
                work_since_deload = 0;
                anchor_idx += 1;
                continue;
            }
        }

        // Hard boundary for this block: horizon end or the next taper start
        let boundary = next_anchor
            .map(|a| a.competition.date - Duration::weeks(i64::from(TAPER_WEEKS)))
            .unwrap_or(config.end_date)
            .min(config.end_date);

        let block = if work_since_deload >= deload_frequency {
            work_since_deload = 0;
            BlockType::Deload
        } else {
            let next = next_work_block(config.goal, previous_work);
            previous_work = Some(next);
            work_since_deload += 1;
            next
        };

        let nominal_end = cursor + Duration::weeks(i64::from(work_block_weeks(block)));
        let end = nominal_end.min(boundary).max(cursor + Duration::weeks(1));
        let end = end.min(config.end_date);

        blocks.push(PlannedBlock {
            block,
            start_date: cursor,
            end_date: end,
            duration_weeks: weeks_between(cursor, end),
            competition: None,
            notes: None,
        });
        cursor = end;
    }

    blocks
}

struct TaperAnchor {
    competition: Competition,
    note: Option<String>,
}

/// Competitions inside the horizon, date order, with same-window conflicts
/// resolved in favor of the higher priority.
fn taper_anchors(config: &TimelineConfig) -> Vec<TaperAnchor> {
    let mut comps: Vec<&Competition> = config
        .competitions
        .iter()
        .filter(|c| c.date > config.start_date && c.date <= config.end_date)
        .collect();
    comps.sort_by(|a, b| a.date.cmp(&b.date).then(a.priority.rank().cmp(&b.priority.rank())));

    let window = Duration::weeks(i64::from(TAPER_WEEKS));
    let mut anchors: Vec<TaperAnchor> = Vec::new();
    for comp in comps {
        match anchors.last_mut() {
            Some(last) if comp.date - last.competition.date < window => {
                if comp.priority.rank() < last.competition.priority.rank() {
                    // Newcomer outranks the held anchor; demote the loser to a note
                    let loser = last.competition.name.clone();
                    last.competition = comp.clone();
                    last.note = Some(format!("Also covers {} on a shortened prep", loser));
                } else {
                    last.note = Some(format!("Also covers {} on a shortened prep", comp.name));
                }
            }
            _ => anchors.push(TaperAnchor {
                competition: comp.clone(),
                note: None,
            }),
        }
    }
    anchors
}

fn weeks_between(start: NaiveDate, end: NaiveDate) -> u8 {
    let days = (end - start).num_days().max(0) as u64;
    days.div_ceil(7) as u8
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
