//! Adaptive training program generation
//!
//! - Weekly session allocation around a fixed running schedule
//! - Split and periodization template selection by block config
//! - Set/rep/RPE prescriptions per phase and experience level
//! - Block-level periodization across a date horizon
//! - Pattern detection and program inference from workout history

pub mod allocator;
pub mod catalog;
pub mod inference;
pub mod models;
pub mod patterns;
pub mod periodization;
pub mod planner;
pub mod prescription;
pub mod splits;

#[cfg(test)]
pub mod test_utils;

pub use allocator::{allocate_week_sessions, WeekContext};
pub use inference::{infer_program, infer_program_from_history, next_in_rotation, InferenceConfig};
pub use patterns::detect_patterns;
pub use periodization::{generate_timeline, recommend_blocks};
pub use planner::{build_weekly_plan, PlanOptions};
pub use prescription::generate_sets;
pub use splits::{select_periodization, select_split};
