//! Generational GA driver.
//!
//! # Loop
//!
//! For a fixed number of generations:
//! 1. Score every individual.
//! 2. If the generation's best beats the best seen so far, remember it.
//! 3. Start the next generation with a copy of this generation's best.
//! 4. Fill the rest by tournament selection, crossover and mutation.
//!
//! The best-ever schedule starts as the seed, so the result is never worse
//! than the heuristic it was seeded with.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::operators::GeneticOperators;
use super::population::{initial_population, tournament_select};
use super::{FitnessEvaluator, GaConfig};
use crate::models::{Catalog, Schedule};

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best schedule seen in any generation (or the seed).
    pub best: Schedule,
    /// Its fitness.
    pub best_fitness: f64,
    /// Fitness of the seed individual.
    pub seed_fitness: f64,
    /// Generations executed.
    pub generations: usize,
    /// Best-ever fitness after each generation.
    pub history: Vec<f64>,
}

/// Runs the GA over a catalog.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use exam_duty::ga::{GaConfig, GaRunner};
/// use exam_duty::models::{Catalog, Schedule, Session, SessionKey, Teacher};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let catalog = Catalog::new(
///     vec![
///         Session::new(SessionKey::new(day, "S1"), 1, 1.0),
///         Session::new(SessionKey::new(day, "S2"), 1, 1.0),
///     ],
///     vec![Teacher::new("A", 1.0), Teacher::new("B", 1.0)],
/// );
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
///
/// let result = GaRunner::run(&catalog, Schedule::for_catalog(&catalog), &config);
/// assert!(result.best_fitness <= result.seed_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed` (or the OS).
    pub fn run(catalog: &Catalog, seed: Schedule, config: &GaConfig) -> GaResult {
        let mut rng = match config.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(catalog, seed, config, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    pub fn run_with_rng<R: Rng>(
        catalog: &Catalog,
        seed: Schedule,
        config: &GaConfig,
        rng: &mut R,
    ) -> GaResult {
        let evaluator = FitnessEvaluator::new(catalog).with_weights(config.penalties);
        let operators = GeneticOperators::from_config(config);
        let size = config.population_size.max(1);

        let seed_fitness = evaluator.evaluate(&seed);
        let mut best = seed.clone();
        let mut best_fitness = seed_fitness;
        let mut history = Vec::new();

        let mut population = initial_population(size, seed, catalog, rng);

        for generation in 0..config.max_generations {
            let fitnesses = evaluator.evaluate_all(&population, config.parallel);
            let Some((elite, &elite_fitness)) = fitnesses
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(b.1))
            else {
                break;
            };

            if elite_fitness < best_fitness {
                best_fitness = elite_fitness;
                best = population[elite].clone();
            }
            history.push(best_fitness);
            debug!(generation, elite_fitness, best_fitness, "generation evaluated");

            let mut next = Vec::with_capacity(size);
            next.push(population[elite].clone());
            while next.len() < size {
                let (Some(i), Some(j)) = (
                    tournament_select(&fitnesses, config.tournament_size, rng),
                    tournament_select(&fitnesses, config.tournament_size, rng),
                ) else {
                    break;
                };
                let (mut c1, mut c2) =
                    operators.crossover(&population[i], &population[j], catalog, rng);
                operators.mutate(&mut c1, catalog, rng);
                operators.mutate(&mut c2, catalog, rng);
                next.push(c1);
                if next.len() < size {
                    next.push(c2);
                }
            }
            population = next;
        }

        info!(
            generations = history.len(),
            seed_fitness,
            best_fitness,
            "genetic search finished"
        );

        GaResult {
            best,
            best_fitness,
            seed_fitness,
            generations: history.len(),
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, SessionKey, Teacher};
    use crate::scheduler::HeuristicScheduler;
    use chrono::NaiveDate;

    fn key(day: u32, label: &str) -> SessionKey {
        SessionKey::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), label)
    }

    fn config(seed: u64) -> GaConfig {
        GaConfig::default().with_seed(seed).with_parallel(false)
    }

    fn tight_catalog() -> Catalog {
        let sessions = (0..8)
            .map(|i| Session::new(key(3 + i / 4, &format!("S{}", i % 4 + 1)), 2, 1.5))
            .collect();
        let teachers = (0..6)
            .map(|i| Teacher::new(format!("T{i}"), 3.0 + (i % 3) as f64 * 1.5))
            .collect();
        Catalog::new(sessions, teachers)
    }

    #[test]
    fn test_two_sessions_two_teachers_reaches_zero() {
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 1, 1.0),
                Session::new(key(3, "S2"), 1, 1.0),
            ],
            vec![Teacher::new("A", 2.0), Teacher::new("B", 2.0)],
        );
        // Start from an empty seed so the GA has to find the assignment
        let result = GaRunner::run(&catalog, Schedule::for_catalog(&catalog), &config(42));
        assert_eq!(result.seed_fitness, 1000.0);
        assert_eq!(result.best_fitness, 0.0);
        assert_eq!(result.generations, 200);
        assert!(result.best.covers(&catalog));
    }

    #[test]
    fn test_history_is_non_increasing() {
        let catalog = tight_catalog();
        let result = GaRunner::run(
            &catalog,
            Schedule::for_catalog(&catalog),
            &config(7).with_max_generations(60),
        );
        assert_eq!(result.history.len(), 60);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.history[0] <= result.seed_fitness);
        assert_eq!(*result.history.last().unwrap(), result.best_fitness);
    }

    #[test]
    fn test_never_worse_than_heuristic_seed() {
        let catalog = tight_catalog();
        let seed = HeuristicScheduler::new().schedule_in_roster_order(&catalog).schedule;
        let result = GaRunner::run(&catalog, seed, &config(11).with_max_generations(40));
        assert!(result.best_fitness <= result.seed_fitness);
        let recomputed = FitnessEvaluator::new(&catalog).evaluate(&result.best);
        assert_eq!(recomputed, result.best_fitness);
    }

    #[test]
    fn test_same_seed_same_result() {
        let catalog = tight_catalog();
        let cfg = config(99).with_max_generations(25);
        let a = GaRunner::run(&catalog, Schedule::for_catalog(&catalog), &cfg);
        let b = GaRunner::run(&catalog, Schedule::for_catalog(&catalog), &cfg);
        assert_eq!(a.best, b.best);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_parallel_evaluation_same_result() {
        let catalog = tight_catalog();
        let cfg = config(5).with_max_generations(20);
        let seq = GaRunner::run(&catalog, Schedule::for_catalog(&catalog), &cfg);
        let par = GaRunner::run(
            &catalog,
            Schedule::for_catalog(&catalog),
            &cfg.clone().with_parallel(true),
        );
        assert_eq!(seq.history, par.history);
    }

    #[test]
    fn test_zero_generations_returns_seed() {
        let catalog = tight_catalog();
        let seed = HeuristicScheduler::new().schedule_in_roster_order(&catalog).schedule;
        let result = GaRunner::run(&catalog, seed.clone(), &config(1).with_max_generations(0));
        assert_eq!(result.best, seed);
        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        let result = GaRunner::run(
            &catalog,
            Schedule::new(),
            &config(3).with_population_size(5).with_max_generations(5),
        );
        assert_eq!(result.best_fitness, 0.0);
        assert!(result.best.is_empty());
    }

    #[test]
    fn test_population_of_one() {
        let catalog = tight_catalog();
        let result = GaRunner::run(
            &catalog,
            Schedule::for_catalog(&catalog),
            &config(3).with_population_size(1).with_max_generations(10),
        );
        assert_eq!(result.generations, 10);
        assert!(result.best_fitness <= result.seed_fitness);
    }
}
