//! Penalty-based fitness.
//!
//! fitness = understaffed · Σ max(0, required − assigned)
//!         + overload_per_hour · Σ max(0, hours − cap)
//!
//! Lower is better; zero means every session is staffed and nobody is over
//! their cap. Teachers missing from the catalog count with a cap of zero.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::PenaltyWeights;
use crate::models::{Catalog, Schedule};

/// Scores schedules against a catalog. Holds no mutable state, so it can be
/// shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
    weights: PenaltyWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with default weights (500 / 1000).
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            weights: PenaltyWeights::default(),
        }
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The catalog being scored against.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Scores one schedule.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        let mut penalty = 0.0;
        let mut hours: BTreeMap<&str, f64> = BTreeMap::new();

        for session in self.catalog.sessions() {
            let assigned = schedule.assigned(&session.key);
            for teacher in assigned {
                *hours.entry(teacher.as_str()).or_insert(0.0) += session.duration;
            }
            let missing = session.required.saturating_sub(assigned.len());
            penalty += self.weights.understaffed * missing as f64;
        }

        for (teacher, total) in hours {
            let excess = total - self.catalog.load_cap(teacher);
            if excess > 0.0 {
                penalty += self.weights.overload_per_hour * excess;
            }
        }

        penalty
    }

    /// Scores a population, optionally on the rayon pool. Results are in
    /// population order either way.
    pub fn evaluate_all(&self, population: &[Schedule], parallel: bool) -> Vec<f64> {
        if parallel {
            population.par_iter().map(|s| self.evaluate(s)).collect()
        } else {
            population.iter().map(|s| self.evaluate(s)).collect()
        }
    }
}
