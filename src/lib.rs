//! Exam supervision duty assignment.
//!
//! Assigns teachers to timetabled exam sessions under per-session staffing
//! requirements and per-teacher hourly caps. A tier-prioritized greedy pass
//! builds a seed schedule; a genetic algorithm then minimizes a weighted
//! penalty for understaffing and overload. Both constraints are soft: the
//! engine minimizes violations, it does not guarantee a feasible schedule.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SessionKey`, `Session`, `Teacher`,
//!   `Catalog`, `Schedule`
//! - **`request`**: Wire records and list-shaped schedule normalization
//! - **`validation`**: Input integrity checks
//! - **`scheduler`**: Greedy seeding heuristic and schedule KPIs
//! - **`ga`**: Fitness, population, operators and the generational driver
//! - **`report`**: Per-teacher projection of the winning schedule
//! - **`planner`**: The end-to-end pipeline
//!
//! # Randomness
//!
//! Every randomized entry point takes an explicit `R: Rng` (or a seed in
//! `GaConfig`), so runs are reproducible.

pub mod error;
pub mod ga;
pub mod models;
pub mod planner;
pub mod report;
pub mod request;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
