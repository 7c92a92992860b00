//! Greedy seeding and KPI evaluation.
//!
//! # Algorithm
//!
//! `HeuristicScheduler` makes a single tier-prioritized greedy pass over the
//! sessions. It never exceeds a teacher's cap, may leave sessions
//! understaffed, and produces the seed individual for the GA.
//!
//! # KPI
//!
//! `ScheduleKpi` reports coverage, shortfall, overload and utilization for
//! any schedule.

mod heuristic;
mod kpi;

pub use heuristic::{HeuristicConfig, HeuristicOutcome, HeuristicScheduler, StaffingWarning};
pub use kpi::ScheduleKpi;
