//! Genetic operators for supervision schedules.
//!
//! - [`one_point_crossover`]: splits the key-ordered session sequence at one
//!   point and swaps tails.
//! - [`reassign_mutation`]: drops one supervisor from one session and refills
//!   it with at most one other teacher.
//!
//! Neither operator re-checks caps across the whole schedule, so children can
//! be infeasible. Fitness penalizes that; nothing is rejected.
//!
//! # Usage
//!
//! ```
//! use exam_duty::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::default();
//! assert!((ops.crossover_rate - 0.8).abs() < 1e-12);
//! assert!((ops.mutation_rate - 0.15).abs() < 1e-12);
//! ```

use std::collections::HashMap;

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use super::GaConfig;
use crate::models::{Catalog, Schedule};

/// Rate-gated crossover and mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticOperators {
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_rate: 0.8,
            mutation_rate: 0.15,
        }
    }
}

impl GeneticOperators {
    /// Takes the rates from a GA configuration.
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
        }
    }

    /// Recombines two parents with probability `crossover_rate`; otherwise
    /// returns copies of them.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Schedule,
        p2: &Schedule,
        catalog: &Catalog,
        rng: &mut R,
    ) -> (Schedule, Schedule) {
        if rng.random::<f64>() > self.crossover_rate {
            return (p1.clone(), p2.clone());
        }
        one_point_crossover(p1, p2, catalog, rng)
    }

    /// Mutates with probability `mutation_rate`. Returns whether the
    /// mutation operator ran.
    pub fn mutate<R: Rng>(
        &self,
        individual: &mut Schedule,
        catalog: &Catalog,
        rng: &mut R,
    ) -> bool {
        if rng.random::<f64>() > self.mutation_rate {
            return false;
        }
        reassign_mutation(individual, catalog, rng);
        true
    }
}

/// One-point crossover over the key-ordered session sequence.
///
/// A cut point is drawn uniformly from `1..n`. Child 1 takes parent 1's
/// sessions before the cut and parent 2's from the cut on; child 2 the
/// reverse. Fewer than two sessions leaves nothing to cut, so the parents are
/// copied. Children share untouched session sets with their parents.
pub fn one_point_crossover<R: Rng>(
    p1: &Schedule,
    p2: &Schedule,
    catalog: &Catalog,
    rng: &mut R,
) -> (Schedule, Schedule) {
    let n = catalog.session_count();
    if n <= 1 {
        return (p1.clone(), p2.clone());
    }
    let cut = rng.random_range(1..n);

    let mut child1 = Schedule::new();
    let mut child2 = Schedule::new();
    for (i, key) in catalog.keys().enumerate() {
        let (head, tail) = if i < cut { (p1, p2) } else { (p2, p1) };
        child1.set_shared(key.clone(), head.shared(key));
        child2.set_shared(key.clone(), tail.shared(key));
    }
    (child1, child2)
}

/// Replaces one supervisor in one randomly chosen session.
///
/// One assigned teacher (if any) is removed. The remaining roster teachers
/// not already in the session, and not the one just removed, are tried in
/// random order; the first whose hours *from earlier sessions only* plus this
/// session's duration fit their cap is added. Later sessions are not
/// considered, so the result can overload a teacher.
pub fn reassign_mutation<R: Rng>(individual: &mut Schedule, catalog: &Catalog, rng: &mut R) {
    let n = catalog.session_count();
    if n == 0 {
        return;
    }
    let position = rng.random_range(0..n);
    let session = &catalog.sessions()[position];

    let mut hours: HashMap<String, f64> = HashMap::new();
    for earlier in &catalog.sessions()[..position] {
        for teacher in individual.assigned(&earlier.key) {
            *hours.entry(teacher.clone()).or_insert(0.0) += earlier.duration;
        }
    }

    let removed = individual
        .assigned(&session.key)
        .iter()
        .choose(rng)
        .cloned();
    if let Some(name) = &removed {
        individual.unassign(&session.key, name);
    }

    let mut candidates: Vec<&str> = catalog
        .teacher_names()
        .filter(|name| !individual.contains(&session.key, name))
        .filter(|name| removed.as_deref() != Some(*name))
        .collect();
    candidates.shuffle(rng);

    let chosen = candidates.into_iter().find(|name| {
        hours.get(*name).copied().unwrap_or(0.0) + session.duration <= catalog.load_cap(name)
    });
    if let Some(name) = chosen {
        individual.assign(&session.key, name);
    }
}
