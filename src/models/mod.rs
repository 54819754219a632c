pub mod block;
pub mod inference;
pub mod plan;
pub mod session;
pub mod targets;
pub mod workout;

pub use block::{BlockConfig, PhaseConfig};
pub use inference::{DetectedPattern, InferredProgram, PatternToProgramResult};
pub use plan::{PlannedDay, PlannedExercise, PrescribedSet, WeeklyPlan};
pub use session::{
  DayOfWeek, ExperienceLevel, FocusCategory, Goal, MovementPattern, RunType, SessionType,
};
pub use targets::{RunningSchedule, SessionRange, WeeklyTargets};
pub use workout::{LoggedSet, WorkoutLog};
