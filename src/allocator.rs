//! Weekly session allocation
//!
//! The constraint solver that turns weekly targets and a fixed external
//! running schedule into seven planned days. Placement is strictly ordered
//! and first-fit in day-index order, so identical inputs always produce an
//! identical plan.
//!
//! Hard constraints: no two hard-effort cardio sessions on adjacent days,
//! and no leg-dominant lifting next to a hard run (downgraded to a warning
//! when no swap target exists). Infeasible targets never fail the call;
//! they surface as shortfall warnings on a structurally complete plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::plan::{PlannedDay, WeeklyPlan};
use crate::models::session::{DayOfWeek, RunType, SessionType};
use crate::models::targets::{RunningSchedule, WeeklyTargets};
use crate::splits::{self, SplitDay};

/// ---------------------------------------------------------------------------
/// Context & Constants
/// ---------------------------------------------------------------------------

/// Caller-supplied context for one allocation. The core takes no ambient
/// state; everything date- or phase-shaped arrives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekContext {
    pub week_start: NaiveDate,
    /// Current periodization phase label, copied into the plan
    pub phase: String,
}

/// Rest days cluster near the weekend by default
const REST_PREFERENCE: [DayOfWeek; 3] = [DayOfWeek::Sunday, DayOfWeek::Saturday, DayOfWeek::Monday];

const LIFT_DURATION_MIN: u32 = 60;
const TEMPO_DURATION_MIN: u32 = 45;
const INTERVALS_DURATION_MIN: u32 = 50;
const LONG_RUN_DURATION_MIN: u32 = 90;
const EASY_RUN_DURATION_MIN: u32 = 40;

/// ---------------------------------------------------------------------------
/// Day Slots (working state, scoped to one allocation call)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct DaySlot {
    day: DayOfWeek,
    available: bool,
    session: Option<SessionType>,
    near_hard_run: bool,
    split_day: Option<SplitDay>,
    note: Option<String>,
    duration_min: Option<u32>,
}

impl DaySlot {
    fn is_free(&self) -> bool {
        self.session.is_none()
    }
}

struct Allocation {
    slots: Vec<DaySlot>,
    rationale: Vec<String>,
    warnings: Vec<String>,
}

impl Allocation {
    fn new(targets: &WeeklyTargets) -> Self {
        let slots = DayOfWeek::ALL
            .iter()
            .map(|day| DaySlot {
                day: *day,
                available: targets.is_available(*day),
                session: None,
                near_hard_run: false,
                split_day: None,
                note: None,
                duration_min: None,
            })
            .collect();
        Self {
            slots,
            rationale: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Mark the day before and after as sitting next to a hard effort.
    /// Week boundaries do not wrap: Sunday's flag never reaches Monday.
    fn mark_adjacent(&mut self, idx: usize) {
        if idx > 0 {
            self.slots[idx - 1].near_hard_run = true;
        }
        if idx + 1 < self.slots.len() {
            self.slots[idx + 1].near_hard_run = true;
        }
    }

    fn log(&mut self, line: String) {
        debug!("{}", line);
        self.rationale.push(line);
    }

    fn warn(&mut self, line: String) {
        warn!("{}", line);
        self.warnings.push(line);
    }
}

/// ---------------------------------------------------------------------------
/// Allocation Entry Point
/// ---------------------------------------------------------------------------

/// Allocate one week of sessions. Always returns a structurally complete
/// plan of exactly seven days; constraint shortfalls come back as warnings.
pub fn allocate_week_sessions(
    targets: &WeeklyTargets,
    running_schedule: Option<&RunningSchedule>,
    ctx: &WeekContext,
) -> (WeeklyPlan, Vec<String>) {
    let mut alloc = Allocation::new(targets);

    for warning in targets.validate() {
        alloc.warn(warning);
    }

    place_fixed_runs(&mut alloc, running_schedule);
    place_rest_days(&mut alloc, targets);
    place_hard_runs(&mut alloc, targets);
    place_zone2(&mut alloc, targets);
    place_lifting(&mut alloc, targets);
    fill_remaining_rest(&mut alloc);

    let rationale = alloc.rationale.join("\n");
    let days = alloc.slots.into_iter().map(slot_to_day).collect();

    let plan = WeeklyPlan {
        week_start: ctx.week_start,
        phase: ctx.phase.clone(),
        days,
        rationale,
        adjustments: Vec::new(),
    };
    (plan, alloc.warnings)
}

/// ---------------------------------------------------------------------------
/// Step 1: Fixed Running Schedule
/// ---------------------------------------------------------------------------

/// The external schedule is immutable for the week: place it verbatim and
/// never route anything over it.
fn place_fixed_runs(alloc: &mut Allocation, schedule: Option<&RunningSchedule>) {
    let Some(schedule) = schedule else {
        return;
    };
    for (day, run) in schedule.iter() {
        let idx = day.index();
        alloc.slots[idx].session = Some(run.session_type());
        alloc.slots[idx].duration_min = Some(run_duration(run));
        alloc.log(format!("Placed fixed {} run on {}", run, day));
        if run.is_hard() {
            alloc.mark_adjacent(idx);
        }
    }
}

fn run_duration(run: RunType) -> u32 {
    match run {
        RunType::Tempo => TEMPO_DURATION_MIN,
        RunType::Intervals => INTERVALS_DURATION_MIN,
        RunType::Long => LONG_RUN_DURATION_MIN,
        RunType::Easy | RunType::Recovery => EASY_RUN_DURATION_MIN,
    }
}

/// ---------------------------------------------------------------------------
/// Step 2: Rest Days
/// ---------------------------------------------------------------------------

fn place_rest_days(alloc: &mut Allocation, targets: &WeeklyTargets) {
    let mut remaining = targets.rest_days;

    for day in REST_PREFERENCE {
        if remaining == 0 {
            break;
        }
        let idx = day.index();
        if alloc.slots[idx].is_free() {
            alloc.slots[idx].session = Some(SessionType::Rest);
            alloc.log(format!("Rest day on {} (preferred)", day));
            remaining -= 1;
        }
    }

    // Preferred list exhausted: claim free days in day order
    for idx in 0..alloc.slots.len() {
        if remaining == 0 {
            break;
        }
        if alloc.slots[idx].is_free() {
            let day = alloc.slots[idx].day;
            alloc.slots[idx].session = Some(SessionType::Rest);
            alloc.log(format!("Rest day on {}", day));
            remaining -= 1;
        }
    }

    if remaining > 0 {
        alloc.warn(format!(
            "Could only place {} of {} rest days",
            targets.rest_days - remaining,
            targets.rest_days
        ));
    }
}

/// ---------------------------------------------------------------------------
/// Step 3: Requested Hard Runs (tempo, then intervals)
/// ---------------------------------------------------------------------------

/// Each placement marks its neighbors, so a later interval cannot land next
/// to an already-placed tempo session.
fn place_hard_runs(alloc: &mut Allocation, targets: &WeeklyTargets) {
    place_hard_run_type(alloc, SessionType::TempoRun, targets.tempo_runs, TEMPO_DURATION_MIN);
    place_hard_run_type(
        alloc,
        SessionType::Intervals,
        targets.interval_runs,
        INTERVALS_DURATION_MIN,
    );
}

fn place_hard_run_type(alloc: &mut Allocation, session: SessionType, count: u8, duration: u32) {
    let mut placed = 0;
    for idx in 0..alloc.slots.len() {
        if placed == count {
            break;
        }
        let slot = &alloc.slots[idx];
        if slot.is_free() && slot.available && !slot.near_hard_run {
            let day = slot.day;
            alloc.slots[idx].session = Some(session);
            alloc.slots[idx].duration_min = Some(duration);
            alloc.mark_adjacent(idx);
            alloc.log(format!("Placed {} on {}", session, day));
            placed += 1;
        }
    }
    if placed < count {
        alloc.warn(format!(
            "Could only place {} of {} {} sessions (no free day clear of other hard efforts)",
            placed, count, session
        ));
    }
}

/// ---------------------------------------------------------------------------
/// Step 4: Zone-2 Cardio
/// ---------------------------------------------------------------------------

/// Zone-2 fills up to the midpoint of its range. It does not mark adjacency;
/// easy aerobic work may stack next to lifting or hard runs.
fn place_zone2(alloc: &mut Allocation, targets: &WeeklyTargets) {
    let count = targets.zone2.midpoint_floor();
    let mut placed = 0;
    for idx in 0..alloc.slots.len() {
        if placed == count {
            break;
        }
        let slot = &alloc.slots[idx];
        if slot.is_free() && slot.available {
            let day = slot.day;
            alloc.slots[idx].session = Some(SessionType::Zone2Cardio);
            alloc.slots[idx].duration_min = Some(targets.zone2_duration_min);
            alloc.log(format!(
                "Placed zone-2 cardio ({} min) on {}",
                targets.zone2_duration_min, day
            ));
            placed += 1;
        }
    }
    if placed < targets.zone2.min {
        alloc.warn(format!(
            "Could only place {} of {} zone-2 sessions",
            placed, targets.zone2.min
        ));
    }
}

/// ---------------------------------------------------------------------------
/// Step 5: Lifting Rotation
/// ---------------------------------------------------------------------------

fn place_lifting(alloc: &mut Allocation, targets: &WeeklyTargets) {
    let size = targets.hypertrophy.midpoint();
    if size == 0 {
        return;
    }

    // Candidate days in day order: free, available, untouched by cardio
    let candidates: Vec<usize> = (0..alloc.slots.len())
        .filter(|&i| alloc.slots[i].is_free() && alloc.slots[i].available)
        .collect();

    let mut rotation = splits::lifting_rotation(size.min(candidates.len() as u8));

    if (rotation.len() as u8) < size {
        alloc.warn(format!(
            "Could only place {} of {} lifting sessions (insufficient free days)",
            rotation.len(),
            size
        ));
    }

    for i in 0..rotation.len() {
        let slot_idx = candidates[i];
        if rotation[i].leg_dominant && alloc.slots[slot_idx].near_hard_run {
            // Swap with the first still-unassigned lifting day clear of hard runs
            let swap = (i + 1..rotation.len()).find(|&j| !alloc.slots[candidates[j]].near_hard_run);
            match swap {
                Some(j) => {
                    let day_i = alloc.slots[slot_idx].day;
                    let day_j = alloc.slots[candidates[j]].day;
                    rotation.swap(i, j);
                    alloc.log(format!(
                        "Moved leg-dominant {} from {} to {} (next to a hard run)",
                        rotation[j].label, day_i, day_j
                    ));
                }
                None => {
                    let day = alloc.slots[slot_idx].day;
                    alloc.warn(format!(
                        "Leg-dominant {} session on {} sits next to a hard run; no swap target available",
                        rotation[i].label, day
                    ));
                    alloc.slots[slot_idx].note =
                        Some("Scheduled next to a hard run - go easy on lower-body volume".to_string());
                }
            }
        }

        // A swap can land another leg-dominant focus on this flagged day
        if rotation[i].leg_dominant
            && alloc.slots[slot_idx].near_hard_run
            && alloc.slots[slot_idx].note.is_none()
        {
            let day = alloc.slots[slot_idx].day;
            alloc.warn(format!(
                "Leg-dominant {} session on {} sits next to a hard run; no swap target available",
                rotation[i].label, day
            ));
        }

        let day = alloc.slots[slot_idx].day;
        let label = rotation[i].label.clone();
        alloc.slots[slot_idx].session = Some(SessionType::HypertrophyLift);
        alloc.slots[slot_idx].duration_min = Some(LIFT_DURATION_MIN);
        alloc.slots[slot_idx].split_day = Some(rotation[i].clone());
        alloc.log(format!("Placed {} lift on {}", label, day));
    }
}

/// ---------------------------------------------------------------------------
/// Step 6: Default Rest
/// ---------------------------------------------------------------------------

fn fill_remaining_rest(alloc: &mut Allocation) {
    for idx in 0..alloc.slots.len() {
        if alloc.slots[idx].is_free() {
            let day = alloc.slots[idx].day;
            alloc.slots[idx].session = Some(SessionType::Rest);
            alloc.log(format!("{} left free, defaulting to rest", day));
        }
    }
}

/// ---------------------------------------------------------------------------
/// Output Conversion
/// ---------------------------------------------------------------------------

fn slot_to_day(slot: DaySlot) -> PlannedDay {
    let session = slot.session.unwrap_or(SessionType::Rest);
    PlannedDay {
        day: slot.day,
        is_rest: session == SessionType::Rest,
        session,
        focus: slot.split_day.as_ref().map(|s| s.label.clone()),
        split_day: slot.split_day,
        notes: slot.note,
        estimated_duration_min: slot.duration_min,
        exercises: Vec::new(),
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
