//! Population construction and tournament selection.

use std::collections::{BTreeSet, HashMap};

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::models::{Catalog, Schedule};

/// A generation of candidate schedules.
pub type Population = Vec<Schedule>;

/// Builds the initial population.
///
/// `seed` becomes individual 0 unchanged. Each other individual is filled
/// session by session (in key order): the roster is shuffled and teachers are
/// added while they fit their cap, up to the session's requirement. Caps are
/// tracked per individual, so freshly built individuals never overload anyone.
pub fn initial_population<R: Rng>(
    size: usize,
    seed: Schedule,
    catalog: &Catalog,
    rng: &mut R,
) -> Population {
    let mut population = Vec::with_capacity(size.max(1));
    population.push(seed);
    while population.len() < size {
        population.push(random_individual(catalog, rng));
    }
    population
}

/// Builds one randomized, cap-respecting individual.
pub fn random_individual<R: Rng>(catalog: &Catalog, rng: &mut R) -> Schedule {
    let mut individual = Schedule::new();
    let mut hours: HashMap<&str, f64> = HashMap::new();
    let mut candidates: Vec<&str> = catalog.teacher_names().collect();

    for session in catalog.sessions() {
        candidates.shuffle(rng);
        let mut assigned = BTreeSet::new();
        for &name in &candidates {
            if assigned.len() >= session.required {
                break;
            }
            let load = hours.entry(name).or_insert(0.0);
            if *load + session.duration <= catalog.load_cap(name) {
                *load += session.duration;
                assigned.insert(name.to_string());
            }
        }
        individual.set(session.key.clone(), assigned);
    }
    individual
}

/// Tournament selection.
///
/// Samples `k` distinct indices (all of them if the population is smaller)
/// and returns the index of the fittest. Ties go to the first sampled.
/// Returns `None` for an empty population.
pub fn tournament_select<R: Rng>(fitnesses: &[f64], k: usize, rng: &mut R) -> Option<usize> {
    let n = fitnesses.len();
    if n == 0 {
        return None;
    }
    let mut best: Option<usize> = None;
    for i in index::sample(rng, n, k.clamp(1, n)) {
        match best {
            Some(b) if fitnesses[b] <= fitnesses[i] => {}
            _ => best = Some(i),
        }
    }
    best
}
