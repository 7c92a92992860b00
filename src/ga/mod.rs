//! GA-based refinement of supervision schedules.
//!
//! # Encoding
//!
//! An individual is a [`Schedule`](crate::models::Schedule): one teacher set
//! per session, in session-key order. Crossover cuts that sequence at one
//! point; mutation swaps one supervisor in one session.
//!
//! # Submodules
//!
//! - [`operators`]: rate-gated crossover and mutation
//! - [`population`]: seeded initialization and tournament selection
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling"

mod config;
mod fitness;
pub mod operators;
pub mod population;
mod runner;

pub use config::{GaConfig, PenaltyWeights};
pub use fitness::FitnessEvaluator;
pub use operators::{one_point_crossover, reassign_mutation, GeneticOperators};
pub use population::{initial_population, random_individual, tournament_select, Population};
pub use runner::{GaResult, GaRunner};
